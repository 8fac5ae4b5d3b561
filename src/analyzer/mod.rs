// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod metrics;
pub mod report;
pub mod summary;

// Re-export the main entry points for ease of use.
pub use metrics::MetricCalculator;
pub use report::PeriodAggregator;
pub use summary::summarize;
