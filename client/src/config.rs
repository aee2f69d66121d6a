//! Client configuration: backend base address and per-request timeout.
//!
//! # Design
//! Configuration is resolved once at construction and held immutably by the
//! `HttpClient`. `from_env` reads `TASKS_API_URL` and `TASKS_API_TIMEOUT_MS`
//! so deployments can point the client at another backend without rebuilding;
//! everything else uses the defaults.

use std::time::Duration;

/// Environment variable overriding the backend base address.
pub const API_URL_VAR: &str = "TASKS_API_URL";

/// Environment variable overriding the request timeout, in milliseconds.
pub const API_TIMEOUT_VAR: &str = "TASKS_API_TIMEOUT_MS";

const DEFAULT_BASE_URL: &str = "http://localhost:3001";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the task backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the backend, without a trailing slash.
    pub base_url: String,
    /// Upper bound for a single request; expiry surfaces as `ApiError::Timeout`.
    pub timeout: Duration,
}

impl Config {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolve configuration from the environment, falling back to the
    /// defaults (`http://localhost:3001`, 10 seconds).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var(API_TIMEOUT_VAR)
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .map_or(DEFAULT_TIMEOUT, Duration::from_millis);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn new_strips_trailing_slash() {
        let config = Config::new("http://localhost:3001/");
        assert_eq!(config.base_url, "http://localhost:3001");
    }

    #[test]
    fn with_timeout_overrides_default() {
        let config = Config::new("http://localhost:3001").with_timeout(Duration::from_millis(250));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
