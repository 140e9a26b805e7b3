//! HTTP server utility methods

use crate::auth::policy::FilePolicyEngine;
use crate::server::server::HttpServer;
use crate::utils::error::ApiError;
use std::sync::Arc;
use tracing::{error, info, warn};

impl HttpServer {
    /// Graceful shutdown signal handler
    pub async fn shutdown_signal() {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C signal, shutting down gracefully"),
                Err(e) => warn!("Failed to install Ctrl+C handler: {}", e),
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                    info!("Received terminate signal, shutting down gracefully");
                }
                Err(e) => {
                    warn!("Failed to install SIGTERM handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }

    /// Re-read the policy file on every SIGHUP
    #[cfg(unix)]
    pub(crate) async fn reload_policy_on_hangup(policy: Arc<FilePolicyEngine>) {
        use tokio::signal::unix::{SignalKind, signal};

        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(signal) => signal,
            Err(e) => {
                warn!("Failed to install SIGHUP handler, policy reload disabled: {}", e);
                return;
            }
        };

        while hangup.recv().await.is_some() {
            match policy.reload().await {
                Ok(count) => info!("Policy reloaded on SIGHUP ({} rules)", count),
                Err(e) => error!("Policy reload failed, keeping previous rules: {}", e),
            }
        }
    }

    /// Format a user-friendly error message for port binding failures
    pub(crate) fn format_bind_error(error: std::io::Error, bind_addr: &str, port: u16) -> ApiError {
        let error_str = error.to_string();

        if error_str.contains("Address already in use")
            || error_str.contains("os error 48")
            || error_str.contains("os error 98")
        {
            ApiError::config(format!(
                "port {} is already in use; stop the other process (lsof -i:{}) or set BUGBY_PORT={}",
                port,
                port,
                port.saturating_add(1)
            ))
        } else if error_str.contains("Permission denied") || error_str.contains("os error 13") {
            ApiError::config(format!(
                "Permission denied for port {}; use a port >= 1024 (BUGBY_PORT=8080)",
                port
            ))
        } else {
            ApiError::config(format!("Failed to bind to {}: {}", bind_addr, error))
        }
    }
}
