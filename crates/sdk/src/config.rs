//! Client Configuration
//!
//! Defaults, overridable through environment variables.
//!
//! # Environment Variables
//!
//! - `ISERVER_URL`: services root (default: `http://localhost:8090/iserver/services`)
//! - `ISERVER_TOKEN`: access token appended to every request
//! - `ISERVER_TIMEOUT_SECS`: request timeout (default: 30)
//! - `ISERVER_POLL_INTERVAL_MS`: job poll interval (default: 1000)
//! - `ISERVER_MAX_POLLS`: give up on a job after this many polls (default and 0: unbounded)

use iserver_core::application::{PollConfig, DEFAULT_POLL_INTERVAL};
use std::time::Duration;

pub const DEFAULT_URL: &str = "http://localhost:8090/iserver/services";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Services root, e.g. `http://localhost:8090/iserver/services`
    pub url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub max_polls: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: None,
        }
    }
}

impl ClientConfig {
    /// Load from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through a key lookup. Unparsable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let url = lookup("ISERVER_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.url);

        let token = lookup("ISERVER_TOKEN").filter(|s| !s.is_empty());

        let timeout = lookup("ISERVER_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let poll_interval = lookup("ISERVER_POLL_INTERVAL_MS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);

        // 0 means no limit
        let max_polls = lookup("ISERVER_MAX_POLLS")
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u32| n > 0);

        Self {
            url,
            token,
            timeout,
            poll_interval,
            max_polls,
        }
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            default_interval: self.poll_interval,
            max_polls: self.max_polls,
        }
    }
}
