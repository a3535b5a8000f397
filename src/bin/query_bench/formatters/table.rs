use anyhow::Result;
use colored::*;
use prettytable::{Cell, Row, Table};
use query_bench::bench::Report;
use crate::formatters::Formatter;

/// Grid table formatter
pub struct TableFormatter {
    /// Whether colors are enabled
    colored: bool,
}

impl TableFormatter {
    /// Create a table formatter with colors
    pub fn new() -> Self {
        TableFormatter {
            colored: true,
        }
    }

    /// Disable colors
    pub fn without_colors() -> Self {
        TableFormatter {
            colored: false,
        }
    }

    fn build(&self, report: &Report) -> Table {
        let mut table = Table::new();

        table.set_titles(Row::new(
            report.headers().iter().map(|h| Cell::new(h)).collect(),
        ));

        for cells in report.rows() {
            table.add_row(Row::new(cells.iter().map(|c| Cell::new(c)).collect()));
        }

        table
    }
}

impl Formatter for TableFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(self.build(report).to_string())
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("\n{}", info.bold())
        } else {
            format!("\n{}", info)
        }
    }
}
