// Collector module: fetches raw chart data and parses it into price series.

pub mod fetcher;
pub mod parser;

// Re-export the provider seam and its production implementation.
pub use fetcher::{JustEtfCollector, PriceSeriesProvider, available_periods};
