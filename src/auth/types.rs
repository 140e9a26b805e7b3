//! Authentication and authorization types

use crate::utils::error::{ApiError, Result};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use async_trait::async_trait;
use futures::future::{Ready, ready};
use uuid::Uuid;

/// Verified caller identity, attached by the access-token gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    /// Token subject
    pub user_id: Uuid,
    /// Role fetched from the user store for this request
    pub role: String,
    /// Raw access token as presented
    pub access_token: String,
}

/// Verified refresh credential, attached by the refresh-token gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshContext {
    /// Owner of the refresh token
    pub user_id: Uuid,
    /// Raw refresh token as presented
    pub refresh_token: String,
}

/// Current-role lookup backed by the user store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleLookup: Send + Sync {
    async fn role_by_id(&self, user_id: Uuid) -> Result<String>;
}

/// Read the identity attached by the access-token gate
pub fn get_identity(req: &HttpRequest) -> Option<IdentityContext> {
    req.extensions().get::<IdentityContext>().cloned()
}

impl FromRequest for IdentityContext {
    type Error = ApiError;
    type Future = Ready<Result<Self>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            get_identity(req)
                .ok_or_else(|| ApiError::unauthenticated("missing or invalid role in context")),
        )
    }
}

impl FromRequest for RefreshContext {
    type Error = ApiError;
    type Future = Ready<Result<Self>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<RefreshContext>()
                .cloned()
                .ok_or_else(|| ApiError::unauthenticated("invalid refresh token")),
        )
    }
}
