//! In-memory refresh token store for tests

use super::store::RefreshTokenStore;
use super::types::RefreshToken;
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct MemoryRefreshTokenStore {
    tokens: Mutex<HashMap<String, RefreshToken>>,
}

impl MemoryRefreshTokenStore {
    pub(crate) fn with_token(token: RefreshToken) -> Self {
        let store = Self::default();
        store.tokens.lock().insert(token.token.clone(), token);
        store
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn create_refresh_token(&self, token: &RefreshToken) -> Result<()> {
        let mut tokens = self.tokens.lock();
        if tokens.contains_key(&token.token) {
            return Err(ApiError::DuplicateToken);
        }
        tokens.insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn fetch_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        Ok(self.tokens.lock().get(token).cloned())
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<()> {
        if let Some(record) = self.tokens.lock().get_mut(token) {
            if record.revoked_at.is_none() {
                let now = Utc::now();
                record.revoked_at = Some(now);
                record.updated_at = now;
            }
        }
        Ok(())
    }
}
