use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use futures::future::join_all;
use rand::Rng;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use serde_json::Value;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::collector::parser::parse_performance_chart;
use crate::config::{AppConfig, LookbackDays};
use crate::model::{CollectorError, PeriodLabel, PricePoint};

const BASE_URL: &str = "https://www.justetf.com/api/etfs";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const BACKOFF_JITTER_MS: u64 = 250;

#[async_trait]
pub trait PriceSeriesProvider: Send + Sync {
    /// Delivers one series per attempted period. A failed fetch or parse
    /// surfaces as a present-but-empty series; a period the provider never
    /// attempted is absent from the map. Consumers must not conflate the two.
    async fn collect(&self, instrument_id: &str) -> HashMap<PeriodLabel, Vec<PricePoint>>;
}

/// Price-history provider backed by the justETF performance-chart endpoint.
pub struct JustEtfCollector {
    client: Client,
    locale: String,
    currency: String,
    lookback: LookbackDays,
    max_retries: u32,
}

impl JustEtfCollector {
    pub fn new(config: &AppConfig) -> Result<Self, CollectorError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9,fr;q=0.8"),
        );
        headers.insert(REFERER, HeaderValue::from_static("https://www.justetf.com/"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            locale: config.locale.clone(),
            currency: config.currency.clone(),
            lookback: config.lookback.clone(),
            max_retries: config.max_retries.max(1),
        })
    }

    /// Date window per period, in canonical order. YTD runs from January 1 of
    /// the current year; the fixed-offset periods look back their configured
    /// day counts. The end date is always `today`.
    pub fn period_ranges(&self, today: NaiveDate) -> Vec<(PeriodLabel, NaiveDate, NaiveDate)> {
        let start_of_year =
            NaiveDate::from_ymd_opt(today.year(), 1, 1).expect("January 1 is always a valid date");
        vec![
            (PeriodLabel::Ytd, start_of_year, today),
            (
                PeriodLabel::ThreeMonths,
                today - chrono::Duration::days(self.lookback.three_months),
                today,
            ),
            (
                PeriodLabel::SixMonths,
                today - chrono::Duration::days(self.lookback.six_months),
                today,
            ),
            (
                PeriodLabel::OneYear,
                today - chrono::Duration::days(self.lookback.one_year),
                today,
            ),
            (
                PeriodLabel::ThreeYears,
                today - chrono::Duration::days(self.lookback.three_years),
                today,
            ),
        ]
    }

    fn build_url(&self, instrument_id: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{BASE_URL}/{instrument_id}/performance-chart\
             ?locale={}&currency={}&valuesType=RELATIVE_CHANGE&reduceData=false\
             &includeDividends=true&features=DIVIDENDS\
             &dateFrom={}&dateTo={}",
            self.locale,
            self.currency,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
        )
    }

    /// Fetches one chart payload, retrying with exponential backoff. The
    /// jitter keeps the concurrent period fetches from retrying in lockstep.
    async fn fetch_chart(&self, url: &str) -> Result<Value, CollectorError> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(url).await {
                Ok(payload) => return Ok(payload),
                Err(err) => {
                    attempt += 1;
                    warn!("attempt {attempt} failed: {err}");
                    if attempt >= self.max_retries {
                        return Err(err);
                    }
                    let exponent = (attempt - 1).min(6);
                    let jitter_ms = rand::rng().random_range(0..BACKOFF_JITTER_MS);
                    sleep(Duration::from_secs(1u64 << exponent) + Duration::from_millis(jitter_ms))
                        .await;
                }
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Value, CollectorError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(CollectorError::Status(response.status()));
        }
        Ok(response.json::<Value>().await?)
    }

    async fn collect_period(
        &self,
        instrument_id: &str,
        period: PeriodLabel,
        start: NaiveDate,
        end: NaiveDate,
    ) -> (PeriodLabel, Vec<PricePoint>) {
        info!("fetching {period} data ({start} to {end})...");
        let url = self.build_url(instrument_id, start, end);
        match self.fetch_chart(&url).await {
            Ok(payload) => {
                let points = parse_performance_chart(&payload);
                if points.is_empty() {
                    warn!("{period}: response held no usable data points");
                } else {
                    let (min, max) = price_range(&points);
                    info!(
                        "{period}: {} data points, price range: {min:.2} - {max:.2}",
                        points.len()
                    );
                }
                (period, points)
            }
            Err(err) => {
                warn!(
                    "{period}: fetch failed after {} attempts: {err}",
                    self.max_retries
                );
                (period, Vec::new())
            }
        }
    }
}

#[async_trait]
impl PriceSeriesProvider for JustEtfCollector {
    async fn collect(&self, instrument_id: &str) -> HashMap<PeriodLabel, Vec<PricePoint>> {
        info!("collecting data for instrument: {instrument_id}");
        let today = Local::now().date_naive();
        let tasks: Vec<_> = self
            .period_ranges(today)
            .into_iter()
            .map(|(period, start, end)| self.collect_period(instrument_id, period, start, end))
            .collect();
        join_all(tasks).await.into_iter().collect()
    }
}

/// Labels whose collected series actually hold data, in canonical order.
pub fn available_periods(data: &HashMap<PeriodLabel, Vec<PricePoint>>) -> Vec<PeriodLabel> {
    PeriodLabel::CANONICAL
        .iter()
        .copied()
        .filter(|period| data.get(period).is_some_and(|series| !series.is_empty()))
        .collect()
}

fn price_range(points: &[PricePoint]) -> (f64, f64) {
    points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), point| {
            (min.min(point.price), max.max(point.price))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> JustEtfCollector {
        JustEtfCollector::new(&AppConfig::default()).expect("client builds")
    }

    #[test]
    fn period_ranges_follow_canonical_order_and_lookbacks() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let ranges = collector().period_ranges(today);

        let labels: Vec<PeriodLabel> = ranges.iter().map(|(label, _, _)| *label).collect();
        assert_eq!(labels, PeriodLabel::CANONICAL);

        assert_eq!(ranges[0].1, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(ranges[1].1, today - chrono::Duration::days(90));
        assert_eq!(ranges[2].1, today - chrono::Duration::days(180));
        assert_eq!(ranges[3].1, today - chrono::Duration::days(365));
        assert_eq!(ranges[4].1, today - chrono::Duration::days(1095));
        assert!(ranges.iter().all(|(_, _, end)| *end == today));
    }

    #[test]
    fn chart_url_carries_window_and_relative_change_mode() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let url = collector().build_url("IE0002XZSHO1", start, end);

        assert!(
            url.starts_with("https://www.justetf.com/api/etfs/IE0002XZSHO1/performance-chart?")
        );
        assert!(url.contains("valuesType=RELATIVE_CHANGE"));
        assert!(url.contains("includeDividends=true"));
        assert!(url.contains("dateFrom=2024-01-01"));
        assert!(url.contains("dateTo=2024-06-15"));
        assert!(url.contains("locale=fr"));
        assert!(url.contains("currency=EUR"));
    }

    #[test]
    fn available_periods_reports_non_empty_series_in_canonical_order() {
        let point = PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            price: 100.0,
        };
        let mut data = HashMap::new();
        data.insert(PeriodLabel::ThreeYears, vec![point]);
        data.insert(PeriodLabel::SixMonths, Vec::new());
        data.insert(PeriodLabel::Ytd, vec![point]);

        assert_eq!(
            available_periods(&data),
            vec![PeriodLabel::Ytd, PeriodLabel::ThreeYears]
        );
    }
}
