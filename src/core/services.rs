use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{Currency, FxError, RatePoint, RateSnapshot};

/// Boxed future used by [`RateSource`] so the trait stays object-safe.
pub type SourceFuture<'a, T> =
    core::pin::Pin<Box<dyn core::future::Future<Output = Result<T, FxError>> + Send + 'a>>;

/// A source of exchange rates.
///
/// This is the narrow seam between the orchestrating [`RateService`] and the
/// upstream provider: the real implementation is [`FxClient`] (HTTP calls to
/// Frankfurter through the resilience policy), and tests can substitute a
/// stub. Implementations perform no retry logic of their own beyond what the
/// client's transport layer provides.
///
/// [`RateService`]: crate::service::RateService
/// [`FxClient`]: crate::core::FxClient
pub trait RateSource: Send + Sync {
    /// Fetch the latest rate table for `base`.
    fn fetch_latest<'a>(&'a self, base: &'a Currency) -> SourceFuture<'a, RateSnapshot>;

    /// Fetch every (date, target) rate pair in `start..=end` for `base`.
    ///
    /// `start <= end` is a precondition enforced by the caller.
    fn fetch_range<'a>(
        &'a self,
        base: &'a Currency,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SourceFuture<'a, Vec<RatePoint>>;

    /// Convert `amount` of `from` into `to` at the provider's current rate.
    fn convert<'a>(
        &'a self,
        from: &'a Currency,
        to: &'a Currency,
        amount: Decimal,
    ) -> SourceFuture<'a, Decimal>;
}
