//! Refresh token types and generation

use crate::utils::error::{ApiError, Result};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Random bytes behind every refresh token value (hex-encoded to 64 characters)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Persisted refresh token record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Opaque token value (unique)
    pub token: String,
    /// Owning user
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Set once on revocation, never cleared
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Lifecycle of a refresh token at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenState {
    Active,
    Revoked,
    Expired,
}

impl RefreshToken {
    /// Build a fresh, unrevoked record expiring `ttl` from now
    pub fn new(token: String, user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token,
            user_id,
            created_at: now,
            updated_at: now,
            expires_at: now + ttl,
            revoked_at: None,
        }
    }

    /// Revocation wins over expiry; both are terminal.
    pub fn state_at(&self, now: DateTime<Utc>) -> RefreshTokenState {
        if self.revoked_at.is_some() {
            RefreshTokenState::Revoked
        } else if now >= self.expires_at {
            RefreshTokenState::Expired
        } else {
            RefreshTokenState::Active
        }
    }

    /// Usable iff not revoked and `now < expires_at`
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == RefreshTokenState::Active
    }
}

/// Generate a refresh token value from the OS CSPRNG
pub fn generate_refresh_token() -> Result<String> {
    let mut data = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut data)
        .map_err(|e| ApiError::internal(format!("error generating random data: {}", e)))?;

    Ok(hex::encode(data))
}
