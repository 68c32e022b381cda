//! Validated currency codes and the conversion blocklist.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::FxError;

/// Currencies excluded from conversion by policy.
const BLOCKED: [&str; 4] = ["TRY", "PLN", "THB", "MXN"];

/// A 3-letter ISO 4217 currency code, normalized to uppercase on entry.
///
/// Lookup and equality are effectively case-insensitive because every code
/// goes through [`Currency::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Parse and normalize a currency code.
    ///
    /// Accepts exactly three ASCII letters (any case, surrounding whitespace
    /// ignored); anything else is [`FxError::UnsupportedCurrency`].
    pub fn parse(code: &str) -> Result<Self, FxError> {
        let trimmed = code.trim();
        if trimmed.len() == 3 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(FxError::UnsupportedCurrency(code.to_string()))
        }
    }

    /// The normalized uppercase code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this currency is on the conversion blocklist.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        BLOCKED.contains(&self.0.as_str())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = FxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.0
    }
}
