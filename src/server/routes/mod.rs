//! HTTP route modules
//!
//! Everything lives under `/api`. Public and protected methods on the same path are separate
//! resources with method guards, so only the protected ones carry the gates.

pub mod auth;
pub mod bugs;
pub mod users;

use crate::server::middleware::{
    AuthMiddleware, AuthorizationMiddleware, RefreshAuthMiddleware, RevokedTokens,
};
use crate::server::state::AppState;
use crate::utils::error::{ApiError, Result};
use actix_web::web;
use uuid::Uuid;

/// Gate instances shared by the route modules
#[derive(Clone)]
pub struct Gates {
    /// Access-token authentication
    pub access: AuthMiddleware,
    /// Policy check, always inside `access`
    pub authorization: AuthorizationMiddleware,
    /// Refresh-token authentication rejecting revoked tokens
    pub refresh: RefreshAuthMiddleware,
    /// Refresh-token authentication tolerating revoked tokens
    pub revoke: RefreshAuthMiddleware,
}

impl Gates {
    pub fn from_state(state: &AppState) -> Self {
        let store_timeout = state.config.auth.store_timeout();

        Self {
            access: AuthMiddleware::new(state.jwt.clone(), state.roles.clone(), store_timeout),
            authorization: AuthorizationMiddleware::new(state.policy_engine()),
            refresh: RefreshAuthMiddleware::new(
                state.tokens.clone(),
                RevokedTokens::Reject,
                store_timeout,
            ),
            revoke: RefreshAuthMiddleware::new(
                state.tokens.clone(),
                RevokedTokens::Allow,
                store_timeout,
            ),
        }
    }
}

/// Configure the `/api` scope
pub fn configure_routes(cfg: &mut web::ServiceConfig, gates: &Gates) {
    cfg.service(
        web::scope("/api")
            .configure(|cfg| users::configure_routes(cfg, gates))
            .configure(|cfg| auth::configure_routes(cfg, gates))
            .configure(|cfg| bugs::configure_routes(cfg, gates)),
    );
}

pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("invalid {} id", what)))
}
