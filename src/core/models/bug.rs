//! Bug report model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bug report as stored and returned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bug {
    #[serde(rename = "bug_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub posted_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bug {
    pub fn new(title: String, description: String, posted_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            posted_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BugPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl BugPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}
