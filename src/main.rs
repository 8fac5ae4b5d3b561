use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use etf_metrics::analyzer::{MetricCalculator, PeriodAggregator, summarize};
use etf_metrics::collector::{JustEtfCollector, PriceSeriesProvider, available_periods};
use etf_metrics::config::load_config;
use etf_metrics::exporter::export_report;
use etf_metrics::model::{AppError, SummaryStats};

/// Financial performance metrics for one instrument across fixed lookback periods.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Instrument identifier (ISIN); falls back to the configured default.
    instrument: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("panic occurred: {panic_info:?}");
    }));

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("analysis failed: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = load_config("config.json")?;
    let instrument = cli
        .instrument
        .unwrap_or_else(|| config.default_instrument.clone());

    info!("analyzing instrument: {instrument}");
    info!("periods: YTD, 3M, 6M, 1Y, 3Y");

    let collector = JustEtfCollector::new(&config)?;
    let data = collector.collect(&instrument).await;

    let periods = available_periods(&data);
    if periods.is_empty() {
        return Err(AppError::NoData);
    }
    let names: Vec<&str> = periods.iter().map(|period| period.as_str()).collect();
    info!(
        "data collection complete, available periods: {}",
        names.join(", ")
    );

    let aggregator = PeriodAggregator::new(MetricCalculator::new(config.trading_days_per_year));
    let report = aggregator.analyze_all_periods(&data);

    export_report(&report, "console", None)?;
    export_report(&report, "csv", None)?;
    export_report(&report, "json", None)?;

    match summarize(&report) {
        SummaryStats::Stats {
            periods_analyzed,
            best_performance,
            highest_volatility,
            max_drawdown,
        } => {
            info!("periods analyzed: {periods_analyzed}");
            info!(
                "best performance: {} ({:.2}%)",
                best_performance.period, best_performance.value
            );
            info!(
                "highest volatility: {} ({:.2}%)",
                highest_volatility.period, highest_volatility.value
            );
            info!(
                "maximum drawdown: {} ({:.2}%)",
                max_drawdown.period, max_drawdown.value
            );
        }
        SummaryStats::NoValidData => {
            warn!("no valid data for analysis");
        }
    }

    info!("analysis complete for instrument {instrument}");
    Ok(())
}
