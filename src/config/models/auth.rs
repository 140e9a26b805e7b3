//! Authentication configuration

use super::*;
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const PLACEHOLDER_SECRETS: &[&str] = &[
    "your-secret-key",
    "change-me",
    "secret",
    "CHANGE-ME-Generate-A-Random-Secret-Of-48-Chars",
];

/// Authentication configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret for access tokens, required
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl: u64,
    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_token_ttl")]
    pub refresh_token_ttl: u64,
    /// Deadline for store lookups made by the gates, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    /// Role assigned to newly created accounts
    #[serde(default = "default_role")]
    pub default_role: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            access_token_ttl: default_access_token_ttl(),
            refresh_token_ttl: default_refresh_token_ttl(),
            store_timeout_ms: default_store_timeout_ms(),
            default_role: default_role(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("store_timeout_ms", &self.store_timeout_ms)
            .field("default_role", &self.default_role)
            .finish()
    }
}

impl AuthConfig {
    /// Merge auth configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.jwt_secret.is_empty() && !PLACEHOLDER_SECRETS.contains(&other.jwt_secret.as_str())
        {
            self.jwt_secret = other.jwt_secret;
        }
        if other.access_token_ttl != default_access_token_ttl() {
            self.access_token_ttl = other.access_token_ttl;
        }
        if other.refresh_token_ttl != default_refresh_token_ttl() {
            self.refresh_token_ttl = other.refresh_token_ttl;
        }
        if other.store_timeout_ms != default_store_timeout_ms() {
            self.store_timeout_ms = other.store_timeout_ms;
        }
        if other.default_role != default_role() {
            self.default_role = other.default_role;
        }
        self
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if PLACEHOLDER_SECRETS.contains(&self.jwt_secret.as_str()) {
            return Err(
                "JWT secret must not use default values. Please generate a secure random secret."
                    .to_string(),
            );
        }

        if self.jwt_secret.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(
                "JWT secret should contain mixed case letters, numbers, and special characters"
                    .to_string(),
            );
        }

        if self.access_token_ttl == 0 {
            return Err("Access token TTL cannot be 0".to_string());
        }

        if self.refresh_token_ttl <= self.access_token_ttl {
            return Err("Refresh token TTL must exceed the access token TTL".to_string());
        }

        if self.refresh_token_ttl > MAX_REFRESH_TOKEN_TTL {
            return Err("Refresh token TTL cannot exceed 10 years".to_string());
        }

        if self.store_timeout_ms == 0 {
            return Err("Store timeout cannot be 0".to_string());
        }

        if self.default_role.trim().is_empty() {
            return Err("Default role cannot be empty".to_string());
        }

        Ok(())
    }

    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl)
    }

    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        let secs = self.refresh_token_ttl.min(MAX_REFRESH_TOKEN_TTL);
        chrono::Duration::seconds(i64::try_from(secs).unwrap_or_default())
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

const MAX_REFRESH_TOKEN_TTL: u64 = 10 * 365 * 24 * 60 * 60;

/// Random per-process secret used by [`AuthConfig::default`]
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
