#![allow(dead_code)]

use std::time::Duration;

use httpmock::MockServer;
use url::Url;

use frankfurter_rs::core::client::{Backoff, FxClientBuilder, RetryConfig};
use frankfurter_rs::{FxClient, RateService};

pub fn setup_server() -> MockServer {
    MockServer::start()
}

/// A client builder pointed at the mock server.
pub fn client_builder(server: &MockServer) -> FxClientBuilder {
    FxClient::builder().base_url(Url::parse(&server.base_url()).unwrap())
}

pub fn test_client(server: &MockServer) -> FxClient {
    client_builder(server).build().unwrap()
}

pub fn test_service(server: &MockServer) -> RateService {
    RateService::new(test_client(server))
}

/// Retry config with a minimal fixed delay so failing tests stay fast.
pub fn fast_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        ..RetryConfig::default()
    }
}

/// A `/latest` style body: `{"base": ..., "date": ..., "rates": {...}}`.
pub fn latest_body(base: &str, date: &str, rates: &[(&str, f64)]) -> String {
    let rates: serde_json::Map<String, serde_json::Value> = rates
        .iter()
        .map(|(code, rate)| ((*code).to_string(), serde_json::json!(rate)))
        .collect();
    serde_json::json!({ "base": base, "date": date, "rates": rates }).to_string()
}
