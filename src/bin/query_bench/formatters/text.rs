use anyhow::Result;
use colored::*;
use query_bench::bench::Report;
use query_bench::IndexLabel;
use crate::formatters::Formatter;

/// Plain text formatter
pub struct TextFormatter {
    /// Whether colors are enabled
    colored: bool,
}

impl TextFormatter {
    /// Create a text formatter with colors
    pub fn new() -> Self {
        TextFormatter {
            colored: true,
        }
    }

    /// Disable colors
    pub fn without_colors() -> Self {
        TextFormatter {
            colored: false,
        }
    }
}

impl Formatter for TextFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let lines: Vec<String> = report
            .measurements
            .iter()
            .map(|m| {
                let line = m.to_string();
                if !self.colored {
                    return line;
                }
                match m.label {
                    IndexLabel::WithIndex => line.green().to_string(),
                    IndexLabel::WithoutIndex => line.yellow().to_string(),
                }
            })
            .collect();

        Ok(lines.join("\n"))
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue().bold())
        } else {
            info.to_string()
        }
    }
}
