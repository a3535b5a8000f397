//! Benchmarking of data-manipulation statements
//!
//! A [`BenchmarkRunner`] times one operation at a time, a [`Sweep`] repeats
//! the full suite over record counts and index labels, and a [`Report`]
//! collects the rows for display.

pub mod config;
pub mod report;
pub mod runner;
pub mod sweep;

pub use config::RunnerConfig;
pub use report::Report;
pub use runner::{BenchmarkRunner, ChunkedOp, ChunkedOutcome, ItemRecord};
pub use sweep::{Sweep, DEFAULT_RECORD_COUNTS};
