use anyhow::Result;
use serde_json::json;
use query_bench::bench::Report;
use crate::formatters::Formatter;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        JsonFormatter
    }
}

impl Formatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    // Keeps stdout parseable: info lines are JSON too
    fn format_info(&self, info: &str) -> String {
        json!({ "info": info }).to_string()
    }
}
