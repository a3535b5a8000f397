use anyhow::Result;
use query_bench::bench::Report;

/// Trait defining an output formatter
pub trait Formatter {
    /// Format a finished sweep
    fn format_report(&self, report: &Report) -> Result<String>;

    /// Format an informational message
    fn format_info(&self, info: &str) -> String;
}
