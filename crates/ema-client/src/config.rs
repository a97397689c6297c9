//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ClientConfig::base_url`].
pub const API_URL_ENV: &str = "EMA_API_URL";

/// Environment variable overriding [`ClientConfig::timeout_secs`].
pub const API_TIMEOUT_ENV: &str = "EMA_API_TIMEOUT_SECS";

/// Where the auth API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and port of the API, without a trailing path.
    pub base_url: String,

    /// Per-request timeout in seconds. 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `EMA_API_URL` / `EMA_API_TIMEOUT_SECS` when
    /// they're set. A timeout that doesn't parse is ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env()`](Self::from_env), reading variables through
    /// `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(API_TIMEOUT_ENV) {
            match raw.trim().parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparsable {API_TIMEOUT_ENV}");
                }
            }
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The request timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Joins `path` onto the base URL with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
