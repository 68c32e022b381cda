//! Centralized constants for the default endpoint and UA.

/// Default user agent sent with every request.
pub(crate) const USER_AGENT: &str =
    concat!("frankfurter-rs/", env!("CARGO_PKG_VERSION"));

/// Frankfurter API base. Paths like `latest` and `{start}..{end}` are appended.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app/";
