//! Configuration types for the Slack client.
//!
//! Plain structs with builder methods, usable without any CLI framework.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use slackdump::config::{ClientConfig, RateLimitPolicy};
//!
//! let config = ClientConfig::new()
//!     .with_timeout(Duration::from_secs(10))
//!     .with_rate_limit(RateLimitPolicy::unbounded().with_max_retries(5));
//!
//! assert_eq!(config.page_size, 1000);
//! assert_eq!(config.rate_limit.max_retries, Some(5));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Slack Web API base URL.
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// Maximum page size `conversations.history` accepts.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Wait applied when a 429 response has no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// What to do when Slack answers `429 Too Many Requests`.
///
/// The default waits for `Retry-After` and retries the identical request
/// forever, with no backoff and no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitPolicy {
    /// Wait used when the response carries no `Retry-After` header.
    pub default_wait: Duration,

    /// Maximum consecutive rate-limited responses tolerated for one request.
    /// `None` retries without limit.
    pub max_retries: Option<u32>,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            default_wait: DEFAULT_RETRY_AFTER,
            max_retries: None,
        }
    }
}

impl RateLimitPolicy {
    /// Retries forever, waiting 60 seconds when Slack gives no hint.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Caps consecutive retries for a single request.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Sets the wait used when `Retry-After` is missing.
    #[must_use]
    pub fn with_default_wait(mut self, wait: Duration) -> Self {
        self.default_wait = wait;
        self
    }

    /// Returns `true` if another retry is allowed after `attempts`
    /// rate-limited responses.
    pub fn allows_retry(&self, attempts: u32) -> bool {
        self.max_retries.is_none_or(|max| attempts <= max)
    }
}

/// Settings for [`SlackClient`](crate::client::SlackClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, without trailing slash (default: `https://slack.com/api`)
    pub base_url: String,

    /// Per-request timeout (default: 30s)
    pub timeout: Duration,

    /// Records requested per page, capped at 1000 (default: 1000)
    pub page_size: usize,

    /// Rate-limit behavior
    pub rate_limit: RateLimitPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            page_size: MAX_PAGE_SIZE,
            rate_limit: RateLimitPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the page size. Values are clamped to `1..=1000`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Sets the rate-limit policy.
    #[must_use]
    pub fn with_rate_limit(mut self, policy: RateLimitPolicy) -> Self {
        self.rate_limit = policy;
        self
    }

    /// Full URL for an API method, e.g. `auth.test`.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }
}
