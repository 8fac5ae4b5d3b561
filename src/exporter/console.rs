use comfy_table::Table;

use crate::model::PeriodMetrics;

const BANNER_WIDTH: usize = 80;

/// Prints the report to stdout as a banner-framed table. This is product
/// output, not diagnostics, so it bypasses the tracing subscriber.
pub fn print_report(rows: &[PeriodMetrics]) {
    let mut table = Table::new();
    table.set_header(vec![
        "Period",
        "Performance (%)",
        "Volatility (%)",
        "Expected Return (%)",
        "Max Drawdown (%)",
        "Data Points",
        "Start Date",
        "End Date",
    ]);
    for row in rows {
        table.add_row(vec![
            row.period.to_string(),
            format!("{:.2}", row.performance_pct),
            format!("{:.2}", row.volatility_pct),
            format!("{:.2}", row.expected_return_pct),
            format!("{:.2}", row.max_drawdown_pct),
            row.data_points.to_string(),
            date_cell(&row.start_date),
            date_cell(&row.end_date),
        ]);
    }

    let banner = "=".repeat(BANNER_WIDTH);
    println!("\n{banner}");
    println!("FINANCIAL PERFORMANCE METRICS");
    println!("{banner}");
    println!("{table}");
    println!("{banner}");
}

pub(super) fn date_cell(date: &Option<chrono::NaiveDate>) -> String {
    match date {
        Some(date) => date.to_string(),
        None => "N/A".to_string(),
    }
}
