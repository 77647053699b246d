use std::time::Duration;

/// Default scramble service address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Create from environment variables
    ///
    /// - `SCRAMBLE_API_URL`: service base URL (default `http://localhost:3000`)
    /// - `SCRAMBLE_API_TIMEOUT_MS`: per-request timeout (default 5000)
    pub fn from_env() -> Self {
        use std::env;

        Self::from_values(
            env::var("SCRAMBLE_API_URL").ok().as_deref(),
            env::var("SCRAMBLE_API_TIMEOUT_MS").ok().as_deref(),
        )
    }

    fn from_values(base_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let base_url = base_url
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = timeout_ms
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}
