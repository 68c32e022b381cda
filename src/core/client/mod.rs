//! Public client surface + builder.
//! Internals are split into `retry` (backoff policy), `breaker` (circuit
//! breaker FSM) and `constants` (UA + default endpoint).

mod breaker;
mod constants;
mod retry;

pub use breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use retry::{Backoff, RetryConfig};

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::core::FxError;
use constants::{DEFAULT_BASE_URL, USER_AGENT};

/// HTTP client for the Frankfurter API with a built-in resilience policy.
///
/// Every upstream request goes through [`send_with_retry`](Self::send_with_retry):
/// the circuit breaker decides whether the call may proceed at all, then
/// transport-level failures are retried with backoff. HTTP error statuses are
/// never retried; they are returned for the caller to classify.
#[derive(Debug, Clone)]
pub struct FxClient {
    http: Client,
    base_url: Url,
    retry: RetryConfig,
    breaker: Arc<CircuitBreaker>,
}

impl Default for FxClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl FxClient {
    /// Create a new builder.
    pub fn builder() -> FxClientBuilder {
        FxClientBuilder::default()
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The current circuit breaker state, for observability.
    pub fn breaker_state(&self) -> CircuitState {
        self.breaker.state()
    }

    /// Execute one upstream call under the resilience policy.
    ///
    /// Fails fast with [`FxError::CircuitOpen`] while the breaker is open.
    /// Otherwise sends the request, retrying transport failures per the
    /// retry config. The breaker records one outcome per call: any received
    /// response counts as success, an exhausted retry loop as failure.
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, FxError> {
        self.breaker.admit()?;

        // Bodiless GETs are always replayable; a request that is not
        // (streaming body) falls through to a single attempt below.
        let mut attempt: u32 = 0;
        while let Some(this_try) = req.try_clone() {
            match this_try.send().await {
                Ok(resp) => {
                    self.breaker.record_success();
                    return Ok(resp);
                }
                Err(err) => {
                    if attempt >= self.retry.max_retries || !self.retry.should_retry(&err) {
                        self.breaker.record_failure();
                        return Err(FxError::Transport(err));
                    }
                    attempt += 1;
                    tokio::time::sleep(self.retry.backoff.delay(attempt)).await;
                }
            }
        }

        match req.send().await {
            Ok(resp) => {
                self.breaker.record_success();
                Ok(resp)
            }
            Err(err) => {
                self.breaker.record_failure();
                Err(FxError::Transport(err))
            }
        }
    }
}

/* ----------------------- Builder ----------------------- */

/// Builder for [`FxClient`].
#[derive(Default)]
pub struct FxClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
    breaker: Option<CircuitBreakerConfig>,
}

impl FxClientBuilder {
    /// Override the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the provider base URL (e.g. a mock server in tests).
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Override the retry policy.
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Override the circuit breaker settings.
    pub fn breaker_config(mut self, cfg: CircuitBreakerConfig) -> Self {
        self.breaker = Some(cfg);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<FxClient, FxError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(FxClient {
            http: httpb.build()?,
            base_url,
            retry: self.retry.unwrap_or_default(),
            breaker: Arc::new(CircuitBreaker::new(self.breaker.unwrap_or_default())),
        })
    }
}
