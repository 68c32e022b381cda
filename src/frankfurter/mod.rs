//! The upstream rate client: HTTP calls to the Frankfurter API, parsed into
//! domain models.
//!
//! Every request goes through the client's resilience policy, so transport
//! retries and circuit breaking happen below this module; nothing here
//! retries on its own.

pub(crate) mod wire;

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{
    Currency, FxClient, FxError, RatePoint, RateSnapshot, RateSource, SourceFuture,
};
use wire::{LatestEnvelope, RangeEnvelope};

/// Fetch the latest rate table for `base` via `GET /latest?base={CODE}`.
pub(crate) async fn fetch_latest(
    client: &FxClient,
    base: &Currency,
) -> Result<RateSnapshot, FxError> {
    let mut url = client.base_url().join("latest")?;
    url.query_pairs_mut().append_pair("base", base.as_str());

    let resp = client.send_with_retry(client.http().get(url.clone())).await?;
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(FxError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    decode_latest(&body, base)
}

/// Convert `amount` of `from` into `to` via the amount-aware
/// `GET /latest?amount={N}&from={CODE}&to={CODE}`.
///
/// The provider returns the already-multiplied amount under the target code.
pub(crate) async fn convert(
    client: &FxClient,
    from: &Currency,
    to: &Currency,
    amount: Decimal,
) -> Result<Decimal, FxError> {
    let mut url = client.base_url().join("latest")?;
    {
        let mut qp = url.query_pairs_mut();
        qp.append_pair("amount", &amount.to_string());
        qp.append_pair("from", from.as_str());
        qp.append_pair("to", to.as_str());
    }

    let resp = client.send_with_retry(client.http().get(url.clone())).await?;
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(FxError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let env: LatestEnvelope =
        serde_json::from_str(&body).map_err(|e| FxError::Data(format!("json parse error: {e}")))?;
    let rates = env
        .rates
        .ok_or_else(|| FxError::Data("missing rates".into()))?;
    rates
        .get(to.as_str())
        .copied()
        .ok_or_else(|| FxError::RateNotFound(to.clone()))
}

/// Fetch the flattened (date, target) rate pairs for `start..=end` via
/// `GET /{start}..{end}?from={CODE}`.
///
/// `start <= end` is the caller's precondition; the service checks it.
pub(crate) async fn fetch_range(
    client: &FxClient,
    base: &Currency,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<RatePoint>, FxError> {
    let mut url = client.base_url().join(&format!("{start}..{end}"))?;
    url.query_pairs_mut().append_pair("from", base.as_str());

    let resp = client.send_with_retry(client.http().get(url.clone())).await?;
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(FxError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let env: RangeEnvelope =
        serde_json::from_str(&body).map_err(|e| FxError::Data(format!("json parse error: {e}")))?;
    let days = env
        .rates
        .ok_or_else(|| FxError::Data("missing rates".into()))?;

    let mut points = Vec::new();
    for (date_str, day) in days {
        let date = parse_date(&date_str)?;
        for (code, rate) in day {
            if rate <= Decimal::ZERO {
                return Err(FxError::Data(format!(
                    "non-positive rate {rate} for {code} on {date_str}"
                )));
            }
            points.push(RatePoint {
                base: base.clone(),
                target: provider_currency(&code)?,
                date,
                rate,
            });
        }
    }
    Ok(points)
}

fn decode_latest(body: &str, requested: &Currency) -> Result<RateSnapshot, FxError> {
    let env: LatestEnvelope =
        serde_json::from_str(body).map_err(|e| FxError::Data(format!("json parse error: {e}")))?;

    let wire_rates = env
        .rates
        .ok_or_else(|| FxError::Data("missing rates".into()))?;
    if wire_rates.is_empty() {
        return Err(FxError::Data("empty rates".into()));
    }

    let as_of = parse_date(
        env.date
            .as_deref()
            .ok_or_else(|| FxError::Data("missing date".into()))?,
    )?;
    let base = match env.base {
        Some(b) => {
            let echoed = provider_currency(&b)?;
            if echoed != *requested {
                return Err(FxError::Data(format!(
                    "provider returned base {echoed}, requested {requested}"
                )));
            }
            echoed
        }
        None => requested.clone(),
    };

    let mut rates = HashMap::with_capacity(wire_rates.len());
    for (code, rate) in wire_rates {
        if rate <= Decimal::ZERO {
            return Err(FxError::Data(format!("non-positive rate {rate} for {code}")));
        }
        rates.insert(provider_currency(&code)?, rate);
    }

    Ok(RateSnapshot { base, as_of, rates })
}

fn parse_date(s: &str) -> Result<NaiveDate, FxError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| FxError::Data(format!("unparseable date '{s}'")))
}

/// A bad code coming back from the provider is a payload defect, not a
/// caller error.
fn provider_currency(code: &str) -> Result<Currency, FxError> {
    Currency::parse(code).map_err(|_| FxError::Data(format!("invalid currency code '{code}'")))
}

impl RateSource for FxClient {
    fn fetch_latest<'a>(&'a self, base: &'a Currency) -> SourceFuture<'a, RateSnapshot> {
        Box::pin(fetch_latest(self, base))
    }

    fn fetch_range<'a>(
        &'a self,
        base: &'a Currency,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SourceFuture<'a, Vec<RatePoint>> {
        Box::pin(fetch_range(self, base, start, end))
    }

    fn convert<'a>(
        &'a self,
        from: &'a Currency,
        to: &'a Currency,
        amount: Decimal,
    ) -> SourceFuture<'a, Decimal> {
        Box::pin(convert(self, from, to, amount))
    }
}
