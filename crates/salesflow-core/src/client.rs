//! Client side of `POST /api/waitlist`.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::SubmitError;

/// Default request timeout. A request that never resolves must not leave
/// the form in `Loading` forever.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default server base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Path of the waitlist endpoint.
pub const WAITLIST_PATH: &str = "/api/waitlist";

/// Sends one email to the waitlist endpoint.
#[async_trait::async_trait]
pub trait WaitlistClient: Send + Sync {
    /// Submit `email` once. No retries.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] for non-success responses, timeouts, and
    /// transport failures.
    async fn join(&self, email: &str) -> Result<(), SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Zero means [`DEFAULT_TIMEOUT`].
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Error body returned by the endpoint on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// [`WaitlistClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpWaitlistClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpWaitlistClient {
    /// Client for the server at `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, SubmitError> {
        Self::with_config(ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        })
    }

    /// # Errors
    ///
    /// Returns [`SubmitError::Transport`] if the HTTP client cannot be built.
    pub fn with_config(cfg: ClientConfig) -> Result<Self, SubmitError> {
        let timeout = if cfg.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            cfg.timeout
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("salesflow/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let endpoint = format!("{}{WAITLIST_PATH}", cfg.base_url.trim_end_matches('/'));

        Ok(Self { endpoint, client })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl WaitlistClient for HttpWaitlistClient {
    async fn join(&self, email: &str) -> Result<(), SubmitError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error);

        debug!(status = status.as_u16(), ?message, "waitlist submission rejected");

        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[allow(clippy::needless_pass_by_value)]
fn transport_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        SubmitError::Timeout
    } else {
        SubmitError::Transport(err.to_string())
    }
}
