use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Envelope for `/latest` (with or without `amount`/`from`/`to`).
#[derive(Deserialize)]
pub(crate) struct LatestEnvelope {
    #[serde(default)]
    pub(crate) base: Option<String>,
    #[serde(default)]
    pub(crate) date: Option<String>,
    #[serde(default)]
    pub(crate) rates: Option<BTreeMap<String, Decimal>>,
}

/// Envelope for `/{start}..{end}`: date → (currency → rate).
#[derive(Deserialize)]
pub(crate) struct RangeEnvelope {
    #[serde(default)]
    pub(crate) rates: Option<BTreeMap<String, BTreeMap<String, Decimal>>>,
}
