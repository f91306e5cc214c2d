//! CSV serialization of metadata records.
//!
//! Text fields are sanitized against spreadsheet formula injection: every
//! `=`, `+`, `-` and `@` becomes a space. Sanitization works on a derived
//! row, never on the record itself.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::types::ImageMetadata;

/// Characters that can start a spreadsheet formula.
const FORMULA_CHARS: [char; 4] = ['=', '+', '-', '@'];

/// Header row, in column order.
pub const CSV_HEADER: [&str; 5] = ["filename", "title", "description", "tags", "filepath"];

/// Replace formula-trigger characters with spaces. Idempotent.
pub fn sanitize_field(value: &str) -> String {
    value.replace(FORMULA_CHARS, " ")
}

/// Last path segment, splitting on both `/` and `\`.
pub fn filename_from_path(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// One exported row. Field order defines the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    pub filename: String,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub filepath: String,
}

impl CsvRow {
    pub fn from_record(record: &ImageMetadata) -> Self {
        let filepath = record.source_path.to_string_lossy().into_owned();
        Self {
            filename: filename_from_path(&filepath).to_string(),
            title: sanitize_field(&record.title),
            description: sanitize_field(&record.description),
            tags: record
                .tags
                .iter()
                .map(|t| sanitize_field(t))
                .collect::<Vec<_>>()
                .join(", "),
            filepath,
        }
    }
}

/// Asks the user where to save the export.
///
/// Returning `None` means the user backed out.
pub trait DestinationPicker {
    fn pick_destination(&self, default_filename: &str) -> Option<PathBuf>;
}

/// Always picks the same path. Used for non-interactive runs.
pub struct FixedDestination(pub PathBuf);

impl DestinationPicker for FixedDestination {
    fn pick_destination(&self, _default_filename: &str) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Turns records into CSV text and optionally saves it.
pub struct CsvExporter {
    default_filename: String,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(&ExportConfig::default())
    }
}

impl CsvExporter {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            default_filename: config.default_filename.clone(),
        }
    }

    pub fn default_filename(&self) -> &str {
        &self.default_filename
    }

    /// Render records as CSV: header row, every field quoted, input order.
    pub fn to_csv_string(&self, records: &[ImageMetadata]) -> Result<String, ExportError> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER)?;
        for record in records {
            writer.serialize(CsvRow::from_record(record))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
        // Every field came from a `String`, so the buffer is valid UTF-8.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Render the records and write them wherever `picker` says.
    ///
    /// Nothing is written when the picker declines.
    pub fn export(
        &self,
        records: &[ImageMetadata],
        picker: &dyn DestinationPicker,
    ) -> Result<PathBuf, ExportError> {
        let csv = self.to_csv_string(records)?;

        let Some(path) = picker.pick_destination(&self.default_filename) else {
            return Err(ExportError::Cancelled);
        };

        write_file(&path, &csv)?;
        tracing::info!("Exported {} record(s) to {:?}", records.len(), path);
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
