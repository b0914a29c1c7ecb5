//! Client configuration.
//!
//! The library reads no environment variables or files; callers (the CLI,
//! tests) construct a `ClientConfig` explicitly.

use std::time::Duration;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000/prune";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_THRESHOLD: f64 = 0.7;
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the pruning service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Endpoint that accepts `POST` prune requests.
    pub service_url: String,
    /// Root of the service, probed by `check_health`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn with_service_url(mut self, url: &str) -> Self {
        self.service_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Config pointing at a service rooted at `base_url`, with the prune
    /// endpoint at `{base_url}/prune`.
    pub fn for_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self::default()
            .with_base_url(base)
            .with_service_url(&format!("{base}/prune"))
    }
}
