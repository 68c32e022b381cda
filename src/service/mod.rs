//! The exchange-rate service: the component callers depend on.
//!
//! Orchestrates the cache, the resilience-wrapped upstream client, and
//! pagination. The latest-rates path is cache-first; conversion is always a
//! fresh upstream call so the result reflects the rate at conversion time,
//! not a snapshot up to 30 minutes stale.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{
    Conversion, Currency, DEFAULT_CACHE_TTL, FxClient, FxError, PageRequest, Paged, RateCache,
    RatePoint, RateSnapshot, RateSource,
};

/// Currency conversion and historical lookup over an injected [`RateSource`].
pub struct RateService {
    source: Arc<dyn RateSource>,
    cache: RateCache,
}

impl RateService {
    /// Service over a [`FxClient`] with the default 30-minute cache TTL.
    #[must_use]
    pub fn new(client: FxClient) -> Self {
        Self::with_source(Arc::new(client), DEFAULT_CACHE_TTL)
    }

    /// Service over a [`FxClient`] with a custom cache TTL.
    #[must_use]
    pub fn with_cache_ttl(client: FxClient, cache_ttl: Duration) -> Self {
        Self::with_source(Arc::new(client), cache_ttl)
    }

    /// Service over any rate source. This is the seam tests use to stub the
    /// upstream provider.
    #[must_use]
    pub fn with_source(source: Arc<dyn RateSource>, cache_ttl: Duration) -> Self {
        Self {
            source,
            cache: RateCache::new(cache_ttl),
        }
    }

    /// The latest rate table for `base`, cache-first.
    ///
    /// A cache hit returns immediately with no upstream call. On a miss the
    /// snapshot is fetched through the resilience policy and cached on
    /// success only; upstream failures propagate and cache nothing.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn latest_rates(&self, base: &str) -> Result<RateSnapshot, FxError> {
        let base = Currency::parse(base)?;
        if let Some(snapshot) = self.cache.get(&base).await {
            return Ok(snapshot);
        }
        let snapshot = self.source.fetch_latest(&base).await?;
        self.cache.insert(base, snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Convert `amount` of `from` into `to` at the current upstream rate.
    ///
    /// Blocked currencies (TRY, PLN, THB, MXN, any case) are rejected with
    /// [`FxError::UnsupportedCurrency`] before any network call. The cache is
    /// never consulted on this path.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<Conversion, FxError> {
        let from = Currency::parse(from)?;
        let to = Currency::parse(to)?;
        for code in [&from, &to] {
            if code.is_blocked() {
                return Err(FxError::UnsupportedCurrency(code.as_str().to_owned()));
            }
        }
        let converted = self.source.convert(&from, &to, amount).await?;
        Ok(Conversion {
            from,
            to,
            amount,
            converted,
        })
    }

    /// One page of the historical rates for `base` over `start..=end`,
    /// sorted by date descending (ties broken by target code).
    ///
    /// `total_items` counts the full flattened set. A page past the end of
    /// the set returns empty `items` with correct totals, not an error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn historical_rates(
        &self,
        base: &str,
        start: NaiveDate,
        end: NaiveDate,
        page: PageRequest,
    ) -> Result<Paged<RatePoint>, FxError> {
        let base = Currency::parse(base)?;
        if start > end {
            return Err(FxError::InvalidDates);
        }

        let mut points = self.source.fetch_range(&base, start, end).await?;
        points.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.target.cmp(&b.target)));

        let total_items = points.len();
        let items: Vec<RatePoint> = points
            .into_iter()
            .skip(page.offset())
            .take(page.page_size() as usize)
            .collect();

        Ok(Paged {
            items,
            total_items,
            page: page.page(),
            page_size: page.page_size(),
        })
    }
}
