//! Policy engine implementations

use super::parser::parse_policy;
use super::types::PolicySet;
use crate::utils::error::{ApiError, Result};
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Allow/deny query surface consumed by the authorization gate
#[cfg_attr(test, mockall::automock)]
pub trait PolicyEngine: Send + Sync {
    fn enforce(&self, role: &str, resource: &str, action: &str) -> Result<bool>;
}

/// Policy engine backed by a rule file, reloadable without a restart
#[derive(Debug)]
pub struct FilePolicyEngine {
    path: Option<PathBuf>,
    rules: ArcSwap<PolicySet>,
}

impl FilePolicyEngine {
    /// Load rules from `path`
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let rules = Self::read(&path).await?;
        info!("Loaded {} policy rules from {:?}", rules.len(), path);

        Ok(Self {
            path: Some(path),
            rules: ArcSwap::from_pointee(rules),
        })
    }

    /// Build from inline policy text; such an engine cannot be reloaded
    pub fn from_policy_text(text: &str) -> Result<Self> {
        Ok(Self {
            path: None,
            rules: ArcSwap::from_pointee(parse_policy(text)?),
        })
    }

    /// Re-read the policy file and swap the rule set atomically.
    ///
    /// On error the previous rule set stays in force.
    pub async fn reload(&self) -> Result<usize> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| ApiError::config("policy engine was not loaded from a file"))?;

        let rules = Self::read(path).await?;
        let count = rules.len();
        self.rules.store(Arc::new(rules));

        info!("Reloaded {} policy rules from {:?}", count, path);
        Ok(count)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.load().len()
    }

    async fn read(path: &Path) -> Result<PolicySet> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            ApiError::config(format!("cannot load policy {:?}: {}", path, e))
        })?;
        parse_policy(&text)
    }
}

impl PolicyEngine for FilePolicyEngine {
    fn enforce(&self, role: &str, resource: &str, action: &str) -> Result<bool> {
        if role.is_empty() || resource.is_empty() || action.is_empty() {
            return Err(ApiError::policy_engine(format!(
                "incomplete request: role={:?} resource={:?} action={:?}",
                role, resource, action
            )));
        }

        let allowed = self.rules.load().allows(role, resource, action);
        debug!(role, resource, action, allowed, "policy decision");
        Ok(allowed)
    }
}
