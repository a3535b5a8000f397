//! The outer loop over record counts and index labels

use log::info;

use crate::bench::runner::BenchmarkRunner;
use crate::core::errors::Result;
use crate::core::measurement::{IndexLabel, Measurement};
use crate::core::provider::ConnectionProvider;

/// Record counts swept when none are given
pub const DEFAULT_RECORD_COUNTS: [usize; 4] = [5, 10, 50, 100];

/// A sweep runs one suite per (record count, label) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sweep {
    record_counts: Vec<usize>,
    labels: Vec<IndexLabel>,
}

impl Default for Sweep {
    fn default() -> Self {
        Sweep::new(DEFAULT_RECORD_COUNTS.to_vec())
    }
}

impl Sweep {
    /// Sweep `record_counts`, each with and without index
    pub fn new(record_counts: Vec<usize>) -> Self {
        Sweep {
            record_counts,
            labels: vec![IndexLabel::WithIndex, IndexLabel::WithoutIndex],
        }
    }

    /// Replace the labels each record count is run under
    pub fn with_labels(mut self, labels: Vec<IndexLabel>) -> Self {
        self.labels = labels;
        self
    }

    pub fn record_counts(&self) -> &[usize] {
        &self.record_counts
    }

    /// Number of rows the sweep produces
    pub fn len(&self) -> usize {
        self.record_counts.len() * self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every suite in order; the first error stops the sweep
    pub fn run<P: ConnectionProvider + 'static>(&self, runner: &BenchmarkRunner<P>) -> Result<Vec<Measurement>> {
        info!("Sweeping {} suites against {}", self.len(), runner.provider().describe());

        let mut rows = Vec::with_capacity(self.len());
        for &count in &self.record_counts {
            for &label in &self.labels {
                rows.push(runner.measure_suite(count, label)?);
            }
        }

        Ok(rows)
    }
}
