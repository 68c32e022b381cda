//! frankfurter-rs: resilient client for the Frankfurter exchange-rate API.
//!
//! Exposes latest-rate lookup, point-in-time conversion, and paginated
//! historical rates. The upstream is treated as unreliable: transport
//! failures are retried with exponential backoff, a circuit breaker fails
//! fast while the provider is known to be down, and latest-rate snapshots
//! are cached for 30 minutes.
//!
//! ```no_run
//! use frankfurter_rs::{FxClient, RateService};
//!
//! # async fn run() -> Result<(), frankfurter_rs::FxError> {
//! let service = RateService::new(FxClient::builder().build()?);
//!
//! let snapshot = service.latest_rates("EUR").await?;
//! println!("1 EUR = {:?} USD", snapshot.rates.get(&"USD".parse()?));
//!
//! let conversion = service.convert("EUR", "USD", "100".parse().unwrap()).await?;
//! println!("100 EUR = {} USD", conversion.converted);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod frankfurter;
pub mod service;

pub use crate::core::{
    Conversion, Currency, FxClient, FxError, PageRequest, Paged, RateCache, RatePoint,
    RateSnapshot, RateSource, SourceFuture,
};
pub use service::RateService;
