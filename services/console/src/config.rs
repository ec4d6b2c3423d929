use std::time::Duration;

use erp_core::config::{optional_or, parse_or};

/// Console configuration loaded from environment variables.
#[derive(Debug)]
pub struct ConsoleConfig {
    /// TCP port for the HTTP server (default 3000). Env var: `CONSOLE_PORT`.
    pub port: u16,
    /// Base URL of the API server (default `http://localhost:5000`). Env var: `API_URL`.
    pub api_url: String,
    /// Per-request timeout for API calls (default 10s). Env var: `API_TIMEOUT_SECS`.
    pub api_timeout: Duration,
}

impl ConsoleConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: parse_or("CONSOLE_PORT", 3000)?,
            api_url: optional_or("API_URL", "http://localhost:5000"),
            api_timeout: Duration::from_secs(parse_or("API_TIMEOUT_SECS", 10)?),
        })
    }
}
