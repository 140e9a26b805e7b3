//! HTTP middleware implementations
//!
//! Per request the chain runs: rate limiter, authentication gate (access-token or
//! refresh-token mode), authorization gate, then the handler. Every gate short-circuits with
//! the standard error envelope.

mod auth;
mod authorization;
mod helpers;
mod rate_limit;
mod refresh_auth;
mod request_id;


pub use auth::{AuthMiddleware, AuthMiddlewareService};
pub use authorization::{AuthorizationMiddleware, AuthorizationMiddlewareService};
pub use helpers::{bearer_token, client_key, request_id};
pub use rate_limit::{RateLimitMiddleware, RateLimitMiddlewareService, RateLimiter};
pub use refresh_auth::{RefreshAuthMiddleware, RefreshAuthMiddlewareService, RevokedTokens};
pub use request_id::{RequestId, RequestIdMiddleware, RequestIdMiddlewareService};
