//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest accepted refill window, one day
pub const MAX_WINDOW_SECS: u64 = 24 * 60 * 60;

/// Per-client token bucket configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Tokens refilled per window
    #[serde(default = "default_rate")]
    pub rate: u32,
    /// Bucket capacity
    #[serde(default = "default_burst")]
    pub burst: u32,
    /// Refill window in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Upper bound on tracked clients
    #[serde(default = "default_max_visitors")]
    pub max_visitors: usize,
    /// Windows of inactivity after which a client is forgotten
    #[serde(default = "default_idle_windows")]
    pub idle_windows: u32,
    /// Key clients by `X-Forwarded-For` / `Forwarded` instead of the peer address
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate: default_rate(),
            burst: default_burst(),
            window_secs: default_window_secs(),
            max_visitors: default_max_visitors(),
            idle_windows: default_idle_windows(),
            trust_forwarded_for: false,
        }
    }
}

impl RateLimitConfig {
    /// Merge rate limit configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.rate != default_rate() {
            self.rate = other.rate;
        }
        if other.burst != default_burst() {
            self.burst = other.burst;
        }
        if other.window_secs != default_window_secs() {
            self.window_secs = other.window_secs;
        }
        if other.max_visitors != default_max_visitors() {
            self.max_visitors = other.max_visitors;
        }
        if other.idle_windows != default_idle_windows() {
            self.idle_windows = other.idle_windows;
        }
        if other.trust_forwarded_for {
            self.trust_forwarded_for = other.trust_forwarded_for;
        }
        self
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.rate == 0 {
            return Err("Rate limit rate cannot be 0".to_string());
        }

        if self.burst == 0 {
            return Err("Rate limit burst cannot be 0".to_string());
        }

        if self.window_secs == 0 {
            return Err("Rate limit window cannot be 0".to_string());
        }

        if self.window_secs > MAX_WINDOW_SECS {
            return Err(format!(
                "Rate limit window cannot exceed {} seconds",
                MAX_WINDOW_SECS
            ));
        }

        if self.max_visitors == 0 {
            return Err("Rate limit max_visitors cannot be 0".to_string());
        }

        if self.idle_windows == 0 {
            return Err("Rate limit idle_windows cannot be 0".to_string());
        }

        Ok(())
    }
}
