//! Configuration module
//!
//! This module provides configuration for the extraction client and workflow
//! engine. All values are read from the environment with sensible defaults,
//! so a bare `Config::from_env()` works against a local extraction service.

use std::env;
use std::time::Duration;

// Common constants
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
const REQUEST_TIMEOUT_SECS: u64 = 60;
const SETTLE_DELAY_MS: u64 = 1000;
const PROGRESS_TICK_SECS: u64 = 7;

/// Client and workflow configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the extraction service.
    pub api_url: String,
    /// Timeout for the single extraction request.
    pub request_timeout_secs: u64,
    /// Pause after a successful submission before the review handoff is
    /// returned. Purely presentational pacing; set to 0 to disable.
    pub settle_delay_ms: u64,
    /// Cadence of the simulated per-file progress counter.
    pub progress_tick_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("DEALSCAN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout_secs: parse_env_var("DEALSCAN_REQUEST_TIMEOUT_SECS")
                .unwrap_or(REQUEST_TIMEOUT_SECS),
            settle_delay_ms: parse_env_var("DEALSCAN_SETTLE_DELAY_MS").unwrap_or(SETTLE_DELAY_MS),
            progress_tick_secs: parse_env_var("DEALSCAN_PROGRESS_TICK_SECS")
                .unwrap_or(PROGRESS_TICK_SECS),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_secs(self.progress_tick_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            settle_delay_ms: SETTLE_DELAY_MS,
            progress_tick_secs: PROGRESS_TICK_SECS,
        }
    }
}

/// Parse an environment variable, returning None if unset or unparseable.
fn parse_env_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
