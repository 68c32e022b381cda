mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use httpmock::Method::GET;
use rust_decimal::Decimal;

use frankfurter_rs::{
    Currency, FxError, RatePoint, RateService, RateSnapshot, RateSource, SourceFuture,
};

#[tokio::test]
async fn latest_parses_snapshot_and_normalizes_base() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/latest").query_param("base", "EUR");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::latest_body("EUR", "2024-01-01", &[("USD", 1.08)]));
    });

    let service = common::test_service(&server);

    // Lowercase input must be normalized before it reaches the wire.
    let snapshot = service.latest_rates("eur").await.unwrap();
    mock.assert();

    assert_eq!(snapshot.base.as_str(), "EUR");
    assert_eq!(snapshot.as_of.to_string(), "2024-01-01");
    assert_eq!(snapshot.rates.len(), 1);
    let usd: frankfurter_rs::Currency = "USD".parse().unwrap();
    assert_eq!(snapshot.rates[&usd], "1.08".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn latest_serves_from_cache_within_ttl() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/latest").query_param("base", "USD");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::latest_body("USD", "2024-01-01", &[("EUR", 0.93)]));
    });

    let service = common::test_service(&server);

    let first = service.latest_rates("USD").await.unwrap();
    let second = service.latest_rates("USD").await.unwrap();

    // Both calls return the same snapshot but only one hits the network.
    mock.assert_calls(1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn latest_refetches_after_ttl_expiry() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/latest").query_param("base", "USD");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::latest_body("USD", "2024-01-01", &[("EUR", 0.93)]));
    });

    let service = RateService::with_cache_ttl(
        common::test_client(&server),
        Duration::from_millis(40),
    );

    let _ = service.latest_rates("USD").await.unwrap();
    let _ = service.latest_rates("USD").await.unwrap();
    mock.assert_calls(1);

    tokio::time::sleep(Duration::from_millis(60)).await;

    let _ = service.latest_rates("USD").await.unwrap();
    mock.assert_calls(2);
}

#[tokio::test]
async fn latest_surfaces_status_error_and_caches_nothing() {
    let server = common::setup_server();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/latest").query_param("base", "CHF");
        then.status(502).body("Bad Gateway");
    });

    let service = common::test_service(&server);

    match service.latest_rates("CHF").await {
        Err(FxError::Status { status, .. }) => assert_eq!(status, 502),
        other => panic!("expected Status error, got {other:?}"),
    }

    // A failed fetch must not populate the cache.
    let _ = service.latest_rates("CHF").await;
    mock.assert_calls(2);
}

#[tokio::test]
async fn latest_rejects_missing_rates_field() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path("/latest").query_param("base", "EUR");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"base":"EUR","date":"2024-01-01"}"#);
    });

    let service = common::test_service(&server);
    assert!(matches!(
        service.latest_rates("EUR").await,
        Err(FxError::Data(_))
    ));
}

#[tokio::test]
async fn latest_rejects_empty_rates() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path("/latest").query_param("base", "EUR");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"base":"EUR","date":"2024-01-01","rates":{}}"#);
    });

    let service = common::test_service(&server);
    assert!(matches!(
        service.latest_rates("EUR").await,
        Err(FxError::Data(_))
    ));
}

#[tokio::test]
async fn latest_rejects_a_provider_base_mismatch() {
    let server = common::setup_server();

    server.mock(|when, then| {
        when.method(GET).path("/latest").query_param("base", "EUR");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::latest_body("USD", "2024-01-01", &[("GBP", 0.79)]));
    });

    let service = common::test_service(&server);
    assert!(matches!(
        service.latest_rates("EUR").await,
        Err(FxError::Data(_))
    ));
}

/// A source that reports a different base than the one it was asked for.
#[derive(Default)]
struct OddBaseSource {
    latest_calls: AtomicUsize,
}

impl RateSource for OddBaseSource {
    fn fetch_latest<'a>(&'a self, _base: &'a Currency) -> SourceFuture<'a, RateSnapshot> {
        self.latest_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async {
            let mut rates = HashMap::new();
            rates.insert("GBP".parse().unwrap(), "0.79".parse().unwrap());
            Ok(RateSnapshot {
                base: "USD".parse().unwrap(),
                as_of: "2024-01-01".parse().unwrap(),
                rates,
            })
        })
    }

    fn fetch_range<'a>(
        &'a self,
        _base: &'a Currency,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> SourceFuture<'a, Vec<RatePoint>> {
        Box::pin(async { Err(FxError::Data("range not stubbed".into())) })
    }

    fn convert<'a>(
        &'a self,
        _from: &'a Currency,
        _to: &'a Currency,
        _amount: Decimal,
    ) -> SourceFuture<'a, Decimal> {
        Box::pin(async { Err(FxError::Data("convert not stubbed".into())) })
    }
}

#[tokio::test]
async fn latest_cache_is_keyed_by_the_requested_base() {
    let source = Arc::new(OddBaseSource::default());
    let service = RateService::with_source(source.clone(), Duration::from_secs(60));

    // Even when the source reports a different base, the entry is stored
    // under the requested key, so the second lookup is a cache hit.
    let first = service.latest_rates("EUR").await.unwrap();
    let second = service.latest_rates("EUR").await.unwrap();

    assert_eq!(source.latest_calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn latest_rejects_malformed_code_without_network() {
    let server = common::setup_server();
    let catch_all = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let service = common::test_service(&server);
    assert!(matches!(
        service.latest_rates("EURO").await,
        Err(FxError::UnsupportedCurrency(_))
    ));
    catch_all.assert_calls(0);
}
