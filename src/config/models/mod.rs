//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod auth;
pub mod logging;
pub mod policy;
pub mod rate_limit;
pub mod server;
pub mod storage;

pub use auth::*;
pub use logging::*;
pub use policy::*;
pub use rate_limit::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

pub fn default_database_url() -> String {
    "sqlite://data/bugby.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_access_token_ttl() -> u64 {
    3600 // 1 hour
}

pub fn default_refresh_token_ttl() -> u64 {
    60 * 24 * 3600 // 60 days
}

pub fn default_store_timeout_ms() -> u64 {
    5000
}

pub fn default_role() -> String {
    "user".to_string()
}

pub fn default_rate() -> u32 {
    5
}

pub fn default_burst() -> u32 {
    10
}

pub fn default_window_secs() -> u64 {
    60
}

pub fn default_max_visitors() -> usize {
    10_000
}

pub fn default_idle_windows() -> u32 {
    3
}

pub fn default_policy_path() -> String {
    "config/rbac_policy.csv".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
