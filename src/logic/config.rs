use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Polling cadence and HTTP timeout for the dashboard client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between polls in watch mode (default: 30)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// HTTP request timeout in seconds (default: 10)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_poll_interval() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl PollConfig {
    /// Load configuration from a TOML file (supports `~`)
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let expanded = shellexpand::tilde(path).into_owned();
        let raw = std::fs::read_to_string(&expanded)
            .with_context(|| format!("reading config file {expanded}"))?;
        let config = toml::from_str(&raw).with_context(|| format!("parsing {expanded}"))?;
        Ok(config)
    }

    /// Apply RECWATCH_* environment overrides on top of this configuration
    pub fn layer_env(mut self) -> Self {
        if let Ok(val) = std::env::var("RECWATCH_POLL_INTERVAL") {
            if let Ok(parsed) = val.parse() {
                self.poll_interval_seconds = parsed;
            }
        }
        if let Ok(val) = std::env::var("RECWATCH_REQUEST_TIMEOUT") {
            if let Ok(parsed) = val.parse() {
                self.request_timeout_seconds = parsed;
            }
        }
        self
    }

    /// Apply command line overrides (highest priority)
    pub fn layer_args(mut self, poll_interval: Option<u64>, request_timeout: Option<u64>) -> Self {
        if let Some(val) = poll_interval {
            self.poll_interval_seconds = val;
        }
        if let Some(val) = request_timeout {
            self.request_timeout_seconds = val;
        }
        self
    }

    /// Create configuration from command line arguments and environment
    /// variables. CLI arguments take priority over the environment.
    pub fn from_args_and_env(poll_interval: Option<u64>, request_timeout: Option<u64>) -> Self {
        Self::default()
            .layer_env()
            .layer_args(poll_interval, request_timeout)
    }
}
