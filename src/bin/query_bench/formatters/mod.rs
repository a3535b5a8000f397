pub mod formatter;
pub mod text;
pub mod json;
pub mod table;

pub use formatter::Formatter;
use clap::ValueEnum;

use json::JsonFormatter;
use table::TableFormatter;
use text::TextFormatter;

/// Available output formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Grid table
    Table,

    /// One line per measurement
    Text,

    /// JSON report
    Json,
}

/// Build the formatter for `format`
pub fn for_format(format: OutputFormat, colored: bool) -> Box<dyn Formatter> {
    match (format, colored) {
        (OutputFormat::Table, true) => Box::new(TableFormatter::new()),
        (OutputFormat::Table, false) => Box::new(TableFormatter::without_colors()),
        (OutputFormat::Text, true) => Box::new(TextFormatter::new()),
        (OutputFormat::Text, false) => Box::new(TextFormatter::without_colors()),
        (OutputFormat::Json, _) => Box::new(JsonFormatter::new()),
    }
}
