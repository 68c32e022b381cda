use std::time::Duration;

use thiserror::Error;

use crate::core::Currency;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum FxError {
    /// The currency code is malformed or on the blocked list.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// A network-level failure (connect error, timeout, interrupted send)
    /// that survived the retry policy.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider returned an unexpected or unsuccessful HTTP status code.
    #[error("unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The provider payload was in an unexpected format or was missing a required field.
    #[error("data format unexpected or missing field: {0}")]
    Data(String),

    /// The circuit breaker is open; the call was rejected without touching the network.
    #[error("circuit open, retry after {retry_after:?}")]
    CircuitOpen {
        /// Time remaining until the breaker admits a trial call.
        retry_after: Duration,
    },

    /// The provider responded without a rate for the requested target currency.
    #[error("rate for {0} not found in provider response")]
    RateNotFound(Currency),

    /// An invalid date range was provided for a historical request (start must not be after end).
    #[error("invalid date range: start must not be after end")]
    InvalidDates,

    /// The page request is out of bounds (page and page size are 1-based).
    #[error("invalid page request: page {page} size {page_size} (both must be >= 1)")]
    InvalidPage {
        /// Requested page number.
        page: u32,
        /// Requested page size.
        page_size: u32,
    },

    /// A provided URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
