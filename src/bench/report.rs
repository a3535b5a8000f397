//! A finished sweep, ready to be formatted

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::bench::config::RunnerConfig;
use crate::core::measurement::{Measurement, HEADERS};

/// Measurements of one sweep plus the context they were taken in
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    /// Description of the benchmarked store
    pub target: String,
    pub config: RunnerConfig,
    pub measurements: Vec<Measurement>,
}

impl Report {
    pub fn new(target: String, config: RunnerConfig, measurements: Vec<Measurement>) -> Self {
        Report {
            generated_at: Utc::now(),
            target,
            config,
            measurements,
        }
    }

    pub fn headers(&self) -> [&'static str; 6] {
        HEADERS
    }

    /// Table cells, one row per measurement
    pub fn rows(&self) -> Vec<[String; 6]> {
        self.measurements.iter().map(Measurement::to_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::measurement::IndexLabel;

    #[test]
    fn test_report_serializes_rows_and_config() {
        let measurement = Measurement {
            record_count: 5,
            select_time: 0.0,
            insert_time: 0.01,
            update_time: 0.02,
            delete_time: 0.03,
            label: IndexLabel::WithIndex,
        };
        let report = Report::new("sqlite:bench.sqlite".to_string(), RunnerConfig::default(), vec![measurement]);

        assert_eq!(report.rows().len(), 1);
        assert_eq!(report.rows()[0][4], "0.03");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["target"], "sqlite:bench.sqlite");
        assert_eq!(json["measurements"][0]["label"], "with-index");
        assert_eq!(json["config"]["chunk_size"], 10_000);
        assert!(json["generated_at"].is_string());
    }
}
