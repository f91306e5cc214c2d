//! Error types for the Glimpse captioning pipeline.
//!
//! Errors are split by blast radius: per-path and per-image errors are
//! isolated by the pipeline, while pipeline, export and config errors abort
//! the whole operation and are surfaced to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Glimpse operations.
#[derive(Error, Debug)]
pub enum GlimpseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Whole-batch failures
    #[error("Image processing failed: {0}")]
    Pipeline(#[from] PipelineError),

    /// CSV export failures
    #[error("Failed to export CSV: {0}")]
    Export(#[from] ExportError),

    /// Malformed records handed to the exporter
    #[error("Invalid metadata: {0}")]
    MetadataValidation(#[from] MetadataValidationError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Why a candidate path was left out of a batch.
///
/// Never returned from validation; only logged.
#[derive(Error, Debug)]
pub enum ValidationSkip {
    #[error("{0} does not exist or is not accessible")]
    NotFound(PathBuf),

    #[error("{path} has unsupported extension {extension:?}")]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),

    #[error("{0} is empty")]
    Empty(PathBuf),

    #[error("cannot stat {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to turn one image into metadata.
///
/// The scheduler isolates these: the image is dropped (or reported as an
/// outcome) while sibling images carry on.
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// The image file could not be read
    #[error("Failed to process image {path}: cannot read file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Network or HTTP-level failure
    #[error("Failed to process image {path}: {message}")]
    Request {
        path: PathBuf,
        message: String,
        status_code: Option<u16>,
    },

    /// Response lacked `candidates[0].content.parts[0].text`
    #[error("Failed to process image {path}: Invalid API response: {message}")]
    MissingContent { path: PathBuf, message: String },

    /// Embedded payload was not the expected JSON shape
    #[error("Failed to process image {path}: unparseable metadata: {message}")]
    Parse { path: PathBuf, message: String },

    /// Call exceeded the configured per-request timeout
    #[error("Failed to process image {path}: timed out after {timeout_ms}ms")]
    Timeout { path: PathBuf, timeout_ms: u64 },
}

impl ProcessingError {
    /// Path of the image this error belongs to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Read { path, .. }
            | Self::Request { path, .. }
            | Self::MissingContent { path, .. }
            | Self::Parse { path, .. }
            | Self::Timeout { path, .. } => path,
        }
    }
}

/// Errors that abort a whole `process_images` call.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Validation left nothing to process
    #[error("No valid images found")]
    NoValidImages,

    /// A scheduler task died instead of settling
    #[error("Batch scheduler failed: {0}")]
    Scheduler(String),
}

/// CSV export failures.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The user abandoned the destination prompt
    #[error("Export cancelled")]
    Cancelled,

    /// Writing the file failed
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV encoder failed
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}

/// A record set handed to the exporter is malformed.
#[derive(Error, Debug)]
pub enum MetadataValidationError {
    #[error("Metadata must be an array")]
    NotASequence,

    #[error("Metadata item {index} is not an object")]
    NotARecord { index: usize },

    #[error("Missing required field '{field}' in metadata item {index}")]
    MissingField { index: usize, field: &'static str },

    #[error("Metadata item {index} is malformed: {message}")]
    Malformed { index: usize, message: String },
}

/// Convenience type alias for Glimpse results.
pub type Result<T> = std::result::Result<T, GlimpseError>;

/// Convenience type alias for pipeline-level results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_error_path() {
        let err = ProcessingError::Timeout {
            path: PathBuf::from("/a/cat.jpg"),
            timeout_ms: 500,
        };
        assert_eq!(err.path(), &PathBuf::from("/a/cat.jpg"));
        assert!(err.to_string().contains("timed out after 500ms"));
    }

    #[test]
    fn test_pipeline_error_wraps_in_top_level() {
        let err: GlimpseError = PipelineError::NoValidImages.into();
        assert_eq!(err.to_string(), "Image processing failed: No valid images found");
    }

    fn render(config_toml: &str, records: &serde_json::Value) -> Result<String> {
        let config = crate::Config::from_toml(config_toml)?;
        let records = crate::validate_records(records)?;
        Ok(crate::CsvExporter::new(&config.export).to_csv_string(&records)?)
    }

    #[test]
    fn test_library_errors_compose_with_question_mark() {
        let err = render("[processing\n", &serde_json::json!([])).unwrap_err();
        assert!(matches!(err, GlimpseError::Config(_)));

        let err = render("", &serde_json::json!({"title": "x"})).unwrap_err();
        assert!(matches!(err, GlimpseError::MetadataValidation(_)));
        assert_eq!(err.to_string(), "Invalid metadata: Metadata must be an array");

        assert!(render("", &serde_json::json!([])).is_ok());
    }

    #[test]
    fn test_missing_field_message() {
        let err = MetadataValidationError::MissingField {
            index: 2,
            field: "title",
        };
        assert_eq!(
            err.to_string(),
            "Missing required field 'title' in metadata item 2"
        );
    }
}
