//! Application state shared across HTTP handlers

use crate::auth::RoleLookup;
use crate::auth::jwt::JwtHandler;
use crate::auth::policy::{FilePolicyEngine, PolicyEngine};
use crate::auth::refresh_token::RefreshTokenStore;
use crate::config::Config;
use crate::server::middleware::RateLimiter;
use crate::storage::SeaOrmDatabase;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// The trait-object fields point at the same database as `database`; the gates only see the
/// narrow capabilities they need.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// User and bug persistence
    pub database: Arc<SeaOrmDatabase>,
    /// Access token codec
    pub jwt: Arc<JwtHandler>,
    /// Refresh token persistence
    pub tokens: Arc<dyn RefreshTokenStore>,
    /// Current-role lookup for the access-token gate
    pub roles: Arc<dyn RoleLookup>,
    /// Reloadable policy engine
    pub policy: Arc<FilePolicyEngine>,
    /// Per-client request limiter
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config, database: SeaOrmDatabase, policy: FilePolicyEngine) -> Result<Self> {
        let database = Arc::new(database);
        let jwt = Arc::new(JwtHandler::new(&config.auth.jwt_secret));
        let rate_limiter = Arc::new(RateLimiter::from_config(&config.rate_limit)?);

        Ok(Self {
            config: Arc::new(config),
            tokens: database.clone(),
            roles: database.clone(),
            database,
            jwt,
            policy: Arc::new(policy),
            rate_limiter,
        })
    }

    /// Policy engine as seen by the authorization gate
    pub fn policy_engine(&self) -> Arc<dyn PolicyEngine> {
        self.policy.clone()
    }
}
