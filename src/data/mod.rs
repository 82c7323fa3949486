//! Data module - benchmark results loading

mod loader;

pub use loader::{load_series, parse_series, BenchmarkSeries, LoaderError};
