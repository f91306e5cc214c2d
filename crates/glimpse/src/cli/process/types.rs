//! CLI enum types for the process command.

use clap::ValueEnum;
use glimpse_core::JsonFormat;

/// Supported output formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON array of records
    #[default]
    Json,
    /// One JSON record per line
    Jsonl,
    /// Spreadsheet-safe CSV
    Csv,
}

impl OutputFormat {
    /// JSON flavour, or `None` for CSV.
    pub fn json_format(self) -> Option<JsonFormat> {
        match self {
            OutputFormat::Json => Some(JsonFormat::Array),
            OutputFormat::Jsonl => Some(JsonFormat::Lines),
            OutputFormat::Csv => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
