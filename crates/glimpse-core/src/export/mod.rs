//! Output surfaces for processed records.
//!
//! - **exporter**: CSV rendering, sanitization and saving
//! - **records**: validation of record sets read back from JSON
//! - **json**: JSON / JSON Lines writers

pub mod exporter;
pub mod json;
pub mod records;

pub use exporter::{
    filename_from_path, sanitize_field, CsvExporter, CsvRow, DestinationPicker, FixedDestination,
    CSV_HEADER,
};
pub use json::{JsonFormat, RecordWriter};
pub use records::validate_records;
