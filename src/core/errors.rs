//! Error types for query-bench
//!
//! This module defines the errors that can occur while connecting to the
//! store, running a measured operation or loading configuration.

use thiserror::Error;

/// Errors that can occur during a benchmark run
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("{operation}: {failed} of {total} chunks failed")]
    ChunkFailures {
        operation: String,
        failed: usize,
        total: usize,
    },
}

/// Result type for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;
