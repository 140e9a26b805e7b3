//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{ApiError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ApiError::config("Configuration is required"))?;

        HttpServer::new(&config).await
    }
}

/// Build and run the server until a shutdown signal arrives
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting bugby v{}", env!("CARGO_PKG_VERSION"));

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!(
        "Serving /health and /api on http://{}",
        server.config().address()
    );

    server.start().await
}
