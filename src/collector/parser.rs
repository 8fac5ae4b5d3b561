// justETF-specific response parsing
use chrono::NaiveDate;
use serde_json::Value;
use tracing::warn;

use crate::model::PricePoint;

/// Anchor used when the response exposes no absolute price field.
const FALLBACK_BASE_PRICE: f64 = 100.0;

/// Converts a performance-chart payload into an absolute price series.
///
/// The endpoint delivers relative percentage changes; they are anchored to
/// the `price.raw` quote, falling back to `latestQuote.raw` and finally to
/// 100.0. The anchor cancels out of every ratio-based metric downstream, so
/// only the absolute magnitudes depend on which field supplied it.
///
/// Entries missing a date or value are skipped, as are entries whose date
/// does not parse. A payload without a usable `series` array yields an empty
/// series, not an error.
pub fn parse_performance_chart(raw: &Value) -> Vec<PricePoint> {
    let Some(series) = raw.get("series").and_then(Value::as_array) else {
        warn!("no series data found in response");
        return Vec::new();
    };

    let base_price = extract_base_price(raw);

    let mut points: Vec<PricePoint> = Vec::with_capacity(series.len());
    for entry in series {
        let Some(date_str) = entry.get("date").and_then(Value::as_str) else {
            continue;
        };
        let Some(value) = entry.get("value") else {
            continue;
        };
        let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                warn!("skipping entry with unparseable date {date_str:?}");
                continue;
            }
        };

        // The value is either a bare number or an object holding `raw`.
        let pct_change = value
            .get("raw")
            .and_then(Value::as_f64)
            .or_else(|| value.as_f64())
            .unwrap_or(0.0);

        points.push(PricePoint {
            date,
            price: base_price * (1.0 + pct_change / 100.0),
        });
    }

    // Downstream metrics rely on date order; the response is not trusted to
    // deliver it.
    points.sort_by_key(|point| point.date);
    points
}

fn extract_base_price(raw: &Value) -> f64 {
    raw.get("price")
        .and_then(|price| price.get("raw"))
        .and_then(Value::as_f64)
        .or_else(|| {
            raw.get("latestQuote")
                .and_then(|quote| quote.get("raw"))
                .and_then(Value::as_f64)
        })
        .unwrap_or(FALLBACK_BASE_PRICE)
}
