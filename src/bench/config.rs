//! Runner configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{BenchError, Result};
use crate::core::timing::TimeUnit;

/// Tunables for a [`BenchmarkRunner`](crate::bench::BenchmarkRunner)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Row limit of the measured SELECT
    pub select_limit: usize,
    /// Rows written per insert transaction
    pub batch_size: usize,
    /// Identifiers handled per update/delete task
    pub chunk_size: usize,
    /// Maximum number of chunk tasks running at once
    pub workers: usize,
    /// Fail the operation when any chunk fails, instead of logging it
    pub strict: bool,
    /// Unit reported timings are rounded in
    pub unit: TimeUnit,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            select_limit: 1000,
            batch_size: 1000,
            chunk_size: 10_000,
            workers: num_cpus::get(),
            strict: false,
            unit: TimeUnit::Seconds,
        }
    }
}

impl RunnerConfig {
    /// Load a config from a JSON file; missing fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: RunnerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the runner cannot work with
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("batch_size", self.batch_size),
            ("chunk_size", self.chunk_size),
            ("workers", self.workers),
        ];
        for (name, value) in sizes {
            if value == 0 {
                return Err(BenchError::InvalidConfig(format!("{} must be greater than zero", name)));
            }
        }
        Ok(())
    }
}
