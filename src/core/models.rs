//! Shared domain models returned by the service operations.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{Currency, FxError};

/// A snapshot of the latest conversion rates for one base currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSnapshot {
    /// The currency the rate table is quoted against.
    pub base: Currency,
    /// The provider's publication date for this table.
    pub as_of: NaiveDate,
    /// Target currency → strictly positive rate. Non-empty for a successful fetch.
    pub rates: HashMap<Currency, Decimal>,
}

/// One historical observation: the rate for a single (date, target) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatePoint {
    /// The base currency of the requested range.
    pub base: Currency,
    /// The quoted currency.
    pub target: Currency,
    /// The observation date.
    pub date: NaiveDate,
    /// The rate on that date; strictly positive.
    pub rate: Decimal,
}

/// The outcome of a point-in-time conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    /// The source currency.
    pub from: Currency,
    /// The target currency.
    pub to: Currency,
    /// The amount that was converted.
    pub amount: Decimal,
    /// The provider's amount-aware result: `amount` expressed in `to`.
    pub converted: Decimal,
}

/// A 1-based page window over a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a page request. Both `page` and `page_size` are 1-based.
    pub fn new(page: u32, page_size: u32) -> Result<Self, FxError> {
        if page == 0 || page_size == 0 {
            return Err(FxError::InvalidPage { page, page_size });
        }
        Ok(Self { page, page_size })
    }

    /// The requested page number.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The requested page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Zero-based offset of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

/// One page of an ordered result set, plus the size of the full set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paged<T> {
    /// At most `page_size` items, in the full set's order.
    pub items: Vec<T>,
    /// The size of the full result set, not of this page.
    pub total_items: usize,
    /// The page number this window corresponds to.
    pub page: u32,
    /// The window size used for slicing.
    pub page_size: u32,
}
