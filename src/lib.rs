//! query-bench: latency of basic data-manipulation statements
//!
//! This crate times SELECT, INSERT, UPDATE and DELETE against a relational
//! store across a sweep of record counts, and turns the timings into rows
//! of a comparison table ("with index" vs "without index").

pub mod core;
pub mod storage;
pub mod bench;

// Re-export the main types
pub use crate::core::errors::{BenchError, Result};
pub use crate::core::measurement::{IndexLabel, Measurement, HEADERS};
pub use crate::core::provider::ConnectionProvider;
pub use crate::core::timing::{round_time, TimeUnit};
pub use bench::{BenchmarkRunner, Report, RunnerConfig, Sweep};
pub use storage::SqliteProvider;
