//! Core data types for the Glimpse pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ProcessingError;

/// Title used for placeholder records built from a failure.
pub const ERROR_TITLE: &str = "Error Processing Image";

/// Metadata generated for one image.
///
/// Created once per image, either by the remote client (success) or by
/// [`ImageMetadata::from_error`] (failure), and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Path of the source image, as handed to the pipeline
    #[serde(alias = "sourcePath", alias = "thumbnail")]
    pub source_path: PathBuf,

    /// Short human-readable title
    pub title: String,

    /// One or two sentence description
    pub description: String,

    /// Tags in model output order
    pub tags: Vec<String>,

    /// True for placeholder records that describe a failure
    #[serde(default, alias = "isError", alias = "error")]
    pub is_error: bool,
}

impl ImageMetadata {
    /// Build a placeholder record describing why `path` could not be processed.
    ///
    /// The title is fixed, the description carries the error message and the
    /// tags are exactly `["error"]`.
    pub fn from_error(error: &ProcessingError, path: &Path) -> Self {
        Self {
            source_path: path.to_path_buf(),
            title: ERROR_TITLE.to_string(),
            description: error.to_string(),
            tags: vec!["error".to_string()],
            is_error: true,
        }
    }
}

/// Payload the model is asked to produce.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl GeneratedMetadata {
    /// Attach the source path, producing a successful record.
    pub fn into_metadata(self, source_path: &Path) -> ImageMetadata {
        ImageMetadata {
            source_path: source_path.to_path_buf(),
            title: self.title,
            description: self.description,
            tags: self.tags,
            is_error: false,
        }
    }
}

/// What happened to one validated input.
#[derive(Debug)]
pub struct ItemOutcome {
    /// The input path
    pub path: PathBuf,
    /// The generated metadata, or why it could not be produced
    pub result: Result<ImageMetadata, ProcessingError>,
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Convert into a record, substituting a placeholder for failures.
    pub fn into_record(self) -> ImageMetadata {
        match self.result {
            Ok(metadata) => metadata,
            Err(e) => ImageMetadata::from_error(&e, &self.path),
        }
    }
}

/// Statistics for a batch run.
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Images that produced metadata
    pub succeeded: usize,

    /// Images whose remote call failed
    pub failed: usize,

    /// Inputs excluded by validation
    pub skipped: usize,

    /// Wall-clock time in seconds
    pub total_seconds: f64,
}

impl ProcessingStats {
    /// Count successes and failures across outcomes.
    pub fn from_outcomes(outcomes: &[ItemOutcome], skipped: usize, total_seconds: f64) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            succeeded,
            failed: outcomes.len() - succeeded,
            skipped,
            total_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_shape() {
        let err = ProcessingError::Parse {
            path: PathBuf::from("/a/cat.jpg"),
            message: "expected value".to_string(),
        };
        let record = ImageMetadata::from_error(&err, Path::new("/a/cat.jpg"));

        assert!(record.is_error);
        assert_eq!(record.title, ERROR_TITLE);
        assert!(record.description.contains("expected value"));
        assert_eq!(record.tags, vec!["error".to_string()]);
        assert_eq!(record.source_path, PathBuf::from("/a/cat.jpg"));
    }

    #[test]
    fn test_deserialize_accepts_thumbnail_alias() {
        let json = r#"{
            "thumbnail": "/p/img.jpg",
            "title": "t",
            "description": "d",
            "tags": ["x"]
        }"#;
        let record: ImageMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(record.source_path, PathBuf::from("/p/img.jpg"));
        assert!(!record.is_error);
    }

    #[test]
    fn test_into_record_substitutes_failures() {
        let outcome = ItemOutcome {
            path: PathBuf::from("b.png"),
            result: Err(ProcessingError::MissingContent {
                path: PathBuf::from("b.png"),
                message: "no candidates".to_string(),
            }),
        };
        let record = outcome.into_record();
        assert!(record.is_error);
        assert_eq!(record.source_path, PathBuf::from("b.png"));
    }

    #[test]
    fn test_stats_from_outcomes() {
        let ok = GeneratedMetadata {
            title: "a".into(),
            description: "b".into(),
            tags: vec![],
        };
        let outcomes = vec![
            ItemOutcome {
                path: PathBuf::from("1.jpg"),
                result: Ok(ok.into_metadata(Path::new("1.jpg"))),
            },
            ItemOutcome {
                path: PathBuf::from("2.jpg"),
                result: Err(ProcessingError::Timeout {
                    path: PathBuf::from("2.jpg"),
                    timeout_ms: 10,
                }),
            },
        ];
        let stats = ProcessingStats::from_outcomes(&outcomes, 3, 1.5);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.skipped, 3);
    }
}
