use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::model::ConfigError;

/// Lookback window sizes, in calendar days, for the fixed-offset periods.
/// YTD has no day count; it always starts on January 1 of the current year.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookbackDays {
    pub three_months: i64,
    pub six_months: i64,
    pub one_year: i64,
    pub three_years: i64,
}

impl Default for LookbackDays {
    fn default() -> Self {
        Self {
            three_months: 90,
            six_months: 180,
            one_year: 365,
            three_years: 1095,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Instrument analyzed when none is given on the command line.
    pub default_instrument: String,
    /// Locale and currency forwarded to the justETF endpoint.
    pub locale: String,
    pub currency: String,
    pub lookback: LookbackDays,
    /// Annualization basis: means scale by this, deviations by its square root.
    pub trading_days_per_year: f64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_instrument: "IE0002XZSHO1".to_string(),
            locale: "fr".to_string(),
            currency: "EUR".to_string(),
            lookback: LookbackDays::default(),
            trading_days_per_year: 252.0,
            request_timeout_secs: 15,
            max_retries: 3,
        }
    }
}

/// Loads configuration from a JSON file, falling back to defaults when the
/// file does not exist. Fields missing from the file keep their defaults; a
/// file that exists but cannot be read or parsed is a hard error.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    if !Path::new(path).exists() {
        debug!("no config file at {path}, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_string(),
        source,
    })?;
    let config: AppConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })?;
    Ok(config)
}
