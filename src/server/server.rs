//! HTTP server core implementation

use crate::auth::policy::FilePolicyEngine;
use crate::config::{Config, ServerConfig};
use crate::server::handlers::health_check;
use crate::server::middleware::{RateLimitMiddleware, RequestIdMiddleware};
use crate::server::routes::{self, Gates};
use crate::server::state::AppState;
use crate::storage::SeaOrmDatabase;
use crate::utils::error::{ApiError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{Condition, DefaultHeaders, Logger},
    web,
};
use std::time::Duration;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Connect storage, apply migrations and load the policy
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let database = SeaOrmDatabase::new(&config.storage.database).await?;
        database.migrate().await?;

        let policy = FilePolicyEngine::load(&config.policy.path).await?;
        let state = AppState::new(config.clone(), database, policy)?;

        Ok(Self::with_state(state))
    }

    /// Wrap already-built state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.server.clone(),
            state,
        }
    }

    /// Create the Actix-web application
    ///
    /// Outermost first: request id, access log, rate limiter, then the route gates.
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let gates = Gates::from_state(&state);
        let rate_limit = &state.config.rate_limit;
        let limiter = RateLimitMiddleware::new(
            state.rate_limiter.clone(),
            rate_limit.trust_forwarded_for,
        );
        let json_config = web::JsonConfig::default()
            .limit(state.config.server.max_body_size)
            .error_handler(|err, _req| ApiError::from(err).into());

        App::new()
            .app_data(state.clone())
            .app_data(json_config)
            .wrap(Condition::new(rate_limit.enabled, limiter))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(DefaultHeaders::new().add(("Server", "bugby")))
            .route("/health", web::get().to(health_check))
            .configure(|cfg| routes::configure_routes(cfg, &gates))
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        #[cfg(unix)]
        tokio::spawn(Self::reload_policy_on_hangup(self.state.policy.clone()));

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .client_request_timeout(Duration::from_secs(self.config.timeout))
            .disable_signals();

        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();
        let handle = server.handle();

        info!("HTTP server listening on {}", bind_addr);

        tokio::spawn(async move {
            Self::shutdown_signal().await;
            handle.stop(true).await;
        });

        server
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
