//! Result rows produced by a benchmark sweep

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column headers of a results table, in row order
pub const HEADERS: [&str; 6] = [
    "Records",
    "Select Time",
    "Insert Time",
    "Update Time",
    "Delete Time",
    "Indexes",
];

/// Tag describing whether a run was made with indexes in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexLabel {
    WithIndex,
    WithoutIndex,
}

impl fmt::Display for IndexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexLabel::WithIndex => write!(f, "With Indexes"),
            IndexLabel::WithoutIndex => write!(f, "Without Indexes"),
        }
    }
}

/// Timings of one read/insert/update/delete suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Number of records the suite worked on
    pub record_count: usize,
    pub select_time: f64,
    pub insert_time: f64,
    pub update_time: f64,
    pub delete_time: f64,
    pub label: IndexLabel,
}

impl Measurement {
    /// Render as table cells, following [`HEADERS`]
    pub fn to_row(&self) -> [String; 6] {
        [
            self.record_count.to_string(),
            format!("{:.2}", self.select_time),
            format!("{:.2}", self.insert_time),
            format!("{:.2}", self.update_time),
            format!("{:.2}", self.delete_time),
            self.label.to_string(),
        ]
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} records ({}): select {:.2}s, insert {:.2}s, update {:.2}s, delete {:.2}s",
            self.record_count, self.label,
            self.select_time, self.insert_time, self.update_time, self.delete_time)
    }
}
