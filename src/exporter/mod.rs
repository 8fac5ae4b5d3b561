// Exporter module: renders a finished report to the console or to flat files.

pub mod console;
pub mod csv;
pub mod json;

pub use self::console::print_report;
pub use self::csv::{CSV_HEADER, write_csv};
pub use self::json::write_json;

use chrono::Local;
use tracing::{info, warn};

use crate::model::{ExportError, PeriodMetrics};

/// Renders the report in the requested format. File formats append their
/// extension to `filename`; when no name is given, a timestamped default is
/// used. An unrecognized format logs a warning and writes nothing.
pub fn export_report(
    rows: &[PeriodMetrics],
    format: &str,
    filename: Option<&str>,
) -> Result<(), ExportError> {
    match format {
        "console" => {
            print_report(rows);
            Ok(())
        }
        "csv" => {
            let path = format!("{}.csv", stem(filename));
            write_csv(rows, &path)?;
            info!("results exported to {path}");
            Ok(())
        }
        "json" => {
            let path = format!("{}.json", stem(filename));
            write_json(rows, &path)?;
            info!("results exported to {path}");
            Ok(())
        }
        other => {
            warn!("unsupported export format: {other}");
            Ok(())
        }
    }
}

fn stem(filename: Option<&str>) -> String {
    match filename {
        Some(name) => name.to_string(),
        None => default_filename_stem(),
    }
}

pub fn default_filename_stem() -> String {
    format!("financial_metrics_{}", Local::now().format("%Y%m%d_%H%M%S"))
}
