//! # bugby-rs
//!
//! Bug-tracking REST backend built around an authentication and authorization pipeline.
//!
//! ## Request pipeline
//!
//! Every request passes, in order, through:
//!
//! - a per-client token-bucket **rate limiter**,
//! - an **authentication gate**, either access-token mode (short-lived HS256 JWT, role looked
//!   up fresh on every request) or refresh-token mode (opaque store-backed token),
//! - an **authorization gate** asking the policy engine whether the role may perform the HTTP
//!   verb on the path,
//!
//! and only then reaches the handler. Each gate answers failures with
//! `{"code": <int>, "error": <string>}`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bugby_rs::{Bugby, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/bugby.yaml").await?;
//!     Bugby::new(config).await?.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use utils::error::{ApiError, Result};

use tracing::{debug, info};

/// Bugby service instance
pub struct Bugby {
    config: Config,
    server: server::HttpServer,
}

impl Bugby {
    /// Connect storage, load the policy and prepare the HTTP server
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new bugby instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run until a shutdown signal arrives
    pub async fn run(self) -> Result<()> {
        debug!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
