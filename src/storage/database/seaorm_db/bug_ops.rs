use crate::core::models::{Bug, BugPatch};
use crate::utils::error::{ApiError, Result};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, bug};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// All bugs, oldest first
    pub async fn list_bugs(&self) -> Result<Vec<Bug>> {
        let models = entities::Bug::find()
            .order_by_asc(bug::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(models.iter().map(bug::Model::to_domain_bug).collect())
    }

    pub async fn find_bug_by_id(&self, bug_id: Uuid) -> Result<Option<Bug>> {
        debug!("Finding bug by ID: {}", bug_id);

        let model = entities::Bug::find_by_id(bug_id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(model.map(|m| m.to_domain_bug()))
    }

    pub async fn create_bug(&self, bug: &Bug) -> Result<Bug> {
        debug!("Creating bug {} for user {}", bug.id, bug.posted_by);

        entities::Bug::insert(bug::Model::from_domain_bug(bug))
            .exec_without_returning(&self.db)
            .await
            .map_err(ApiError::Database)?;

        Ok(bug.clone())
    }

    /// Apply a partial update and return the stored result
    pub async fn update_bug(&self, bug_id: Uuid, patch: BugPatch) -> Result<Bug> {
        debug!("Updating bug: {}", bug_id);

        let mut active_model: bug::ActiveModel = entities::Bug::find_by_id(bug_id)
            .one(&self.db)
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::not_found("bug not found"))?
            .into();

        if let Some(title) = patch.title {
            active_model.title = Set(title);
        }
        if let Some(description) = patch.description {
            active_model.description = Set(description);
        }
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model.update(&self.db).await.map_err(ApiError::Database)?;
        Ok(updated.to_domain_bug())
    }

    pub async fn delete_bug(&self, bug_id: Uuid) -> Result<()> {
        debug!("Deleting bug: {}", bug_id);

        let result = entities::Bug::delete_by_id(bug_id)
            .exec(&self.db)
            .await
            .map_err(ApiError::Database)?;

        if result.rows_affected == 0 {
            return Err(ApiError::not_found("bug not found"));
        }
        Ok(())
    }
}
