use crate::model::{MetricHighlight, PeriodMetrics, SummaryStats};

/// Extracts the cross-period extremes from a report.
///
/// Only rows that actually carry data participate; a report of nothing but
/// degraded rows yields the `NoValidData` sentinel. Each tracked metric picks
/// its maximum. Volatility and drawdown are non-negative magnitudes, so
/// "highest" is a maximum for all three. Ties go to the earlier row.
pub fn summarize(report: &[PeriodMetrics]) -> SummaryStats {
    let valid: Vec<&PeriodMetrics> = report.iter().filter(|row| row.has_data()).collect();
    if valid.is_empty() {
        return SummaryStats::NoValidData;
    }

    SummaryStats::Stats {
        periods_analyzed: valid.len(),
        best_performance: best_by(&valid, |row| row.performance_pct),
        highest_volatility: best_by(&valid, |row| row.volatility_pct),
        max_drawdown: best_by(&valid, |row| row.max_drawdown_pct),
    }
}

/// Leftmost maximum: strict comparison keeps the first row on ties.
fn best_by(rows: &[&PeriodMetrics], metric: impl Fn(&PeriodMetrics) -> f64) -> MetricHighlight {
    let mut best = rows[0];
    for &row in &rows[1..] {
        if metric(row) > metric(best) {
            best = row;
        }
    }
    MetricHighlight {
        period: best.period,
        value: metric(best),
    }
}
