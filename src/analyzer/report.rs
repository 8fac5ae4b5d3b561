use std::collections::HashMap;

use crate::analyzer::metrics::MetricCalculator;
use crate::model::{PeriodLabel, PeriodMetrics, PricePoint};

/// Builds the per-period report table from whatever series the provider
/// managed to deliver.
#[derive(Debug, Clone, Copy)]
pub struct PeriodAggregator {
    calculator: MetricCalculator,
}

impl PeriodAggregator {
    pub fn new(calculator: MetricCalculator) -> Self {
        Self { calculator }
    }

    /// Walks the canonical period order and emits one row per period present
    /// in the mapping. Absent periods are omitted entirely; present-but-empty
    /// (or single-point) series become zero-filled rows with no dates. The
    /// mapping's own iteration order never influences the report.
    pub fn analyze_all_periods(
        &self,
        data: &HashMap<PeriodLabel, Vec<PricePoint>>,
    ) -> Vec<PeriodMetrics> {
        PeriodLabel::CANONICAL
            .iter()
            .filter_map(|&period| {
                data.get(&period)
                    .map(|series| self.metrics_for_period(period, series))
            })
            .collect()
    }

    /// One report row. Metrics are rounded to two decimals here; dates stay
    /// calendar values and are only formatted at the export boundary.
    pub fn metrics_for_period(&self, period: PeriodLabel, series: &[PricePoint]) -> PeriodMetrics {
        if series.len() < 2 {
            return PeriodMetrics::degraded(period);
        }

        PeriodMetrics {
            period,
            performance_pct: round2(self.calculator.performance(series)),
            volatility_pct: round2(self.calculator.volatility(series, true)),
            expected_return_pct: round2(self.calculator.expected_return(series, true)),
            max_drawdown_pct: round2(self.calculator.max_drawdown(series)),
            data_points: series.len(),
            start_date: series.first().map(|p| p.date),
            end_date: series.last().map(|p| p.date),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
