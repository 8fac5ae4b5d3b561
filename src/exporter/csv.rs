use crate::exporter::console::date_cell;
use crate::model::{ExportError, PeriodMetrics};

/// Field names of PeriodMetrics, in declaration order. The JSON exporter
/// emits the same names through serde.
pub const CSV_HEADER: [&str; 8] = [
    "period",
    "performance_pct",
    "volatility_pct",
    "expected_return_pct",
    "max_drawdown_pct",
    "data_points",
    "start_date",
    "end_date",
];

pub fn write_csv(rows: &[PeriodMetrics], path: &str) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record([
            row.period.to_string(),
            format!("{:.2}", row.performance_pct),
            format!("{:.2}", row.volatility_pct),
            format!("{:.2}", row.expected_return_pct),
            format!("{:.2}", row.max_drawdown_pct),
            row.data_points.to_string(),
            date_cell(&row.start_date),
            date_cell(&row.end_date),
        ])?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(())
}
