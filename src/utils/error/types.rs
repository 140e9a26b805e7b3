//! Error types for the service

use crate::auth::jwt::TokenError;
use thiserror::Error;

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, ApiError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, invalid or expired credential
    #[error("{0}")]
    Unauthenticated(String),

    /// Valid identity, disallowed action
    #[error("{0}")]
    Forbidden(String),

    /// Request throughput exceeded
    #[error("{0}")]
    RateLimited(String),

    /// Referenced token or resource is absent
    #[error("{0}")]
    NotFound(String),

    /// Malformed input from the caller
    #[error("{0}")]
    BadRequest(String),

    /// Unique resource already exists
    #[error("{0}")]
    Conflict(String),

    /// Supplied password does not match the stored hash
    #[error("incorrect email or password")]
    CredentialMismatch,

    /// Access token codec failures
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Refresh token value collided with an existing row
    #[error("refresh token already exists")]
    DuplicateToken,

    /// Policy engine failures
    #[error("Policy engine error: {0}")]
    PolicyEngine(String),

    /// Password hashing failures
    #[error("Hash error: {0}")]
    Hash(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing store did not answer in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}
