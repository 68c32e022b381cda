//! Core components of the `frankfurter-rs` client.
//!
//! This module contains the foundational building blocks of the crate:
//! - The main [`FxClient`] and its builder, including the retry and
//!   circuit-breaker policy every upstream call goes through.
//! - The primary [`FxError`] type.
//! - Shared domain models like [`RateSnapshot`] and [`RatePoint`].
//! - The [`RateCache`] and the [`RateSource`] seam used by the service layer.

/// The main client (`FxClient`), builder, and resilience configuration.
pub mod client;
/// The primary error type (`FxError`) for the crate.
pub mod error;
/// Shared domain models (`RateSnapshot`, `RatePoint`, `Paged`, ...).
pub mod models;

pub mod cache;
pub mod currency;
/// Service traits for abstracting the upstream rate source.
pub mod services;

// convenient re-exports so most code can just `use crate::core::FxClient`
pub use cache::{DEFAULT_CACHE_TTL, RateCache};
pub use client::{FxClient, FxClientBuilder};
pub use currency::Currency;
pub use error::FxError;
pub use models::{Conversion, PageRequest, Paged, RatePoint, RateSnapshot};
pub use services::{RateSource, SourceFuture};
