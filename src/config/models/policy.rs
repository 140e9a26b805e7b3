//! Policy source configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Location of the authorization rule file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_policy_path")]
    pub path: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            path: default_policy_path(),
        }
    }
}

impl PolicyConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.path != default_policy_path() {
            self.path = other.path;
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("Policy path cannot be empty".to_string());
        }
        Ok(())
    }
}
