//! Refresh token store adapter

use super::types::{RefreshToken, generate_refresh_token};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use chrono::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

/// Persistence capability required by the refresh-token gate and the token routes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// Insert a new token; a value collision surfaces as [`ApiError::DuplicateToken`]
    async fn create_refresh_token(&self, token: &RefreshToken) -> Result<()>;

    /// Fetch a token by value, `None` when unknown
    async fn fetch_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>>;

    /// Mark a token revoked; revoking twice is not an error
    async fn revoke_refresh_token(&self, token: &str) -> Result<()>;
}

/// Generate and persist a refresh token for `user_id`.
///
/// A value collision is retried once with a fresh value, then treated as fatal.
pub async fn issue_refresh_token(
    store: &dyn RefreshTokenStore,
    user_id: Uuid,
    ttl: Duration,
) -> Result<RefreshToken> {
    for attempt in 0..2 {
        let token = RefreshToken::new(generate_refresh_token()?, user_id, ttl);

        match store.create_refresh_token(&token).await {
            Ok(()) => {
                debug!("Stored refresh token for user: {}", user_id);
                return Ok(token);
            }
            Err(ApiError::DuplicateToken) if attempt == 0 => {
                warn!("Refresh token collision for user {}, retrying once", user_id);
            }
            Err(ApiError::DuplicateToken) => break,
            Err(e) => return Err(e),
        }
    }

    Err(ApiError::internal("refresh token collided twice"))
}
