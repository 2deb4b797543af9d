//! HTTP transport for the Slack Web API.
//!
//! [`Transport`] is the seam between the client's pagination and retry logic
//! and the network. [`HttpTransport`] is the real implementation on top of
//! a blocking `reqwest` client; tests substitute an in-memory fake.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::SlackdumpError;

/// Raw HTTP response as the client needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Retry-After` header value, if present.
    pub retry_after: Option<String>,
    /// Response body.
    pub body: String,
}

impl HttpResponse {
    /// A `200 OK` response with `body`.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            retry_after: None,
            body: body.into(),
        }
    }

    /// A `429 Too Many Requests` response.
    pub fn too_many_requests(retry_after: Option<&str>) -> Self {
        Self {
            status: 429,
            retry_after: retry_after.map(str::to_string),
            body: String::new(),
        }
    }

    /// Returns `true` for a 429 status.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Returns `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one authenticated GET against a Web API method.
pub trait Transport {
    /// Sends `GET {base}/{method}?{params}`.
    ///
    /// Transport failures (timeout, DNS, connection reset) are returned as
    /// [`SlackdumpError::Network`]. HTTP error statuses are *not* errors at
    /// this layer.
    fn get(&self, method: &str, params: &[(&str, String)]) -> Result<HttpResponse, SlackdumpError>;
}

/// Blocking `reqwest` transport with the bearer token attached to every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Builds the HTTP session: bearer `Authorization` and JSON
    /// `Content-Type` headers, plus the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SlackdumpError::InvalidToken`] if the token cannot be used
    /// as a header value, or [`SlackdumpError::Network`] if the TLS backend
    /// fails to initialize.
    pub fn new(token: &str, config: &ClientConfig) -> Result<Self, SlackdumpError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| SlackdumpError::invalid_token())?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("slackdump/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SlackdumpError::network("building HTTP client", e))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, method: &str, params: &[(&str, String)]) -> Result<HttpResponse, SlackdumpError> {
        let url = self.config.method_url(method);
        debug!(%url, ?params, "GET");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .map_err(|e| SlackdumpError::network(format!("GET {method}"), e))?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .map_err(|e| SlackdumpError::network(format!("reading {method} response"), e))?;

        debug!(status, bytes = body.len(), "response");
        Ok(HttpResponse {
            status,
            retry_after,
            body,
        })
    }
}
