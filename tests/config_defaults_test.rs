use etf_metrics::config::load_config;
use etf_metrics::model::ConfigError;

struct TempConfig {
    path: std::path::PathBuf,
}

impl TempConfig {
    fn new(body: &str) -> Self {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "etf-metrics-test-{}-{}.json",
            std::process::id(),
            rand::random::<u64>()
        ));
        std::fs::write(&path, body).expect("write temp config");
        Self { path }
    }

    fn path_str(&self) -> &str {
        self.path.to_str().expect("utf8 temp path")
    }
}

impl Drop for TempConfig {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join(format!(
        "etf-metrics-absent-{}-{}.json",
        std::process::id(),
        rand::random::<u64>()
    ));

    let config = load_config(path.to_str().expect("utf8 temp path")).expect("defaults");
    assert_eq!(config.default_instrument, "IE0002XZSHO1");
    assert_eq!(config.locale, "fr");
    assert_eq!(config.currency, "EUR");
    assert_eq!(config.trading_days_per_year, 252.0);
    assert_eq!(config.request_timeout_secs, 15);
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.lookback.three_months, 90);
    assert_eq!(config.lookback.six_months, 180);
    assert_eq!(config.lookback.one_year, 365);
    assert_eq!(config.lookback.three_years, 1095);
}

#[test]
fn fields_missing_from_the_file_keep_their_defaults() {
    let file = TempConfig::new(r#"{ "locale": "en", "max_retries": 5 }"#);

    let config = load_config(file.path_str()).expect("partial config");
    assert_eq!(config.locale, "en");
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.currency, "EUR");
    assert_eq!(config.trading_days_per_year, 252.0);
}

#[test]
fn nested_lookback_fields_overlay_individually() {
    let file = TempConfig::new(r#"{ "lookback": { "three_months": 60 } }"#);

    let config = load_config(file.path_str()).expect("partial lookback");
    assert_eq!(config.lookback.three_months, 60);
    assert_eq!(config.lookback.six_months, 180);
    assert_eq!(config.lookback.three_years, 1095);
}

#[test]
fn malformed_file_is_a_hard_error() {
    let file = TempConfig::new("definitely not json");

    let err = load_config(file.path_str()).expect_err("parse failure");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn unreadable_path_is_an_io_error() {
    // A directory exists but cannot be read as a file.
    let dir = std::env::temp_dir();

    let err = load_config(dir.to_str().expect("utf8 temp path")).expect_err("read failure");
    assert!(matches!(err, ConfigError::Io { .. }));
}
