pub mod analyzer;
pub mod collector;
pub mod config;
pub mod exporter;
pub mod model;
