use std::fs;

use crate::model::{ExportError, PeriodMetrics};

/// Writes the report as a pretty-printed array of records. Dates serialize
/// as ISO strings, absent dates as null.
pub fn write_json(rows: &[PeriodMetrics], path: &str) -> Result<(), ExportError> {
    let body = serde_json::to_string_pretty(rows)?;
    fs::write(path, body).map_err(|source| ExportError::Io {
        path: path.to_string(),
        source,
    })
}
