//! Logging setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the configured level.

use crate::config::LoggingConfig;
use crate::utils::error::{ApiError, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter from `RUST_LOG`, falling back to the configured directive
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| ApiError::config(format!("invalid log level '{}': {}", config.level, e))),
    }
}

/// Install the global subscriber; call once from `main`
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| ApiError::internal(format!("failed to install logger: {}", e)))
}
