// Core structs: PricePoint, PeriodMetrics, SummaryStats
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// One observation of the instrument's price history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// The fixed set of lookback periods a report can contain.
///
/// `CANONICAL` is the authoritative report row order; input mappings are
/// re-walked in this order no matter how they iterate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PeriodLabel {
    #[serde(rename = "YTD")]
    Ytd,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "3Y")]
    ThreeYears,
}

impl PeriodLabel {
    pub const CANONICAL: [PeriodLabel; 5] = [
        PeriodLabel::Ytd,
        PeriodLabel::ThreeMonths,
        PeriodLabel::SixMonths,
        PeriodLabel::OneYear,
        PeriodLabel::ThreeYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodLabel::Ytd => "YTD",
            PeriodLabel::ThreeMonths => "3M",
            PeriodLabel::SixMonths => "6M",
            PeriodLabel::OneYear => "1Y",
            PeriodLabel::ThreeYears => "3Y",
        }
    }
}

impl std::fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One report row: the four indicators for a single period, rounded to two
/// decimals, plus the size and date span of the series they came from.
///
/// `None` dates mark a row built without data; they render as `N/A` at the
/// export boundary only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodMetrics {
    pub period: PeriodLabel,
    pub performance_pct: f64,
    pub volatility_pct: f64,
    pub expected_return_pct: f64,
    pub max_drawdown_pct: f64,
    pub data_points: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl PeriodMetrics {
    /// A zero-filled row for a period whose series was empty or too short.
    ///
    /// The only way a row with `data_points == 0` is ever built, so "no data"
    /// stays distinguishable from metrics that really computed to zero.
    pub fn degraded(period: PeriodLabel) -> Self {
        Self {
            period,
            performance_pct: 0.0,
            volatility_pct: 0.0,
            expected_return_pct: 0.0,
            max_drawdown_pct: 0.0,
            data_points: 0,
            start_date: None,
            end_date: None,
        }
    }

    pub fn has_data(&self) -> bool {
        self.data_points > 0
    }
}

/// The winning period for one tracked indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricHighlight {
    pub period: PeriodLabel,
    pub value: f64,
}

/// Cross-period extremes pulled from a report.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryStats {
    /// Every row in the report was degraded; there is nothing to rank.
    NoValidData,
    Stats {
        periods_analyzed: usize,
        best_performance: MetricHighlight,
        highest_volatility: MetricHighlight,
        max_drawdown: MetricHighlight,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response status: {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level failure surfaced by the binary; everything maps to exit code 1.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Collector(#[from] CollectorError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("no data collected for any period")]
    NoData,
}
