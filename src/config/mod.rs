//! Configuration management
//!
//! This module handles loading, validation, and management of the service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `BUGBY_HOST`, `BUGBY_PORT`, `DB_URL`, `SECRET`, `BUGBY_POLICY_PATH` and
    /// `BUGBY_LOG_LEVEL`. `SECRET` is required; anything else unset keeps its default.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();

        if let Some(host) = env_var("BUGBY_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env_parse::<u16>("BUGBY_PORT")? {
            config.server.port = port;
        }
        if let Some(url) = env_var("DB_URL") {
            config.storage.database.url = url;
        }

        config.auth.jwt_secret = env_var("SECRET")
            .ok_or_else(|| ApiError::Config("SECRET must be set".to_string()))?;

        if let Some(path) = env_var("BUGBY_POLICY_PATH") {
            config.policy.path = path;
        }
        if let Some(level) = env_var("BUGBY_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| ApiError::Config(format!("Server config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| ApiError::Config(format!("Auth config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| ApiError::Config(format!("Storage config error: {}", e)))?;

        self.rate_limit
            .validate()
            .map_err(|e| ApiError::Config(format!("Rate limit config error: {}", e)))?;

        self.policy
            .validate()
            .map_err(|e| ApiError::Config(format!("Policy config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.auth = self.auth.merge(other.auth);
        self.storage = self.storage.merge(other.storage);
        self.rate_limit = self.rate_limit.merge(other.rate_limit);
        self.policy = self.policy.merge(other.policy);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| ApiError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>> {
    env_var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|_| ApiError::Config(format!("{} has an invalid value: {}", key, raw)))
        })
        .transpose()
}
