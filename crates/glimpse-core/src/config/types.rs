//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Instruction sent alongside every image.
pub const DEFAULT_PROMPT: &str = "Generate a title, description, and relevant tags for this image. \
     Format the response as JSON with 'title', 'description', and 'tags' fields.";

/// How the scheduler admits remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    /// Fixed-size groups; each group fully settles before the next starts.
    #[default]
    Chunked,
    /// Semaphore-bounded pool; a new call starts as soon as a slot frees.
    Sliding,
}

/// Batch processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Maximum remote calls in flight at once
    pub concurrency: usize,

    /// Accepted file extensions (case-insensitive, without the dot)
    pub supported_formats: Vec<String>,

    /// Admission strategy for remote calls
    pub schedule: Schedule,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            concurrency: 3,
            supported_formats: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "gif".to_string(),
                "webp".to_string(),
            ],
            schedule: Schedule::Chunked,
        }
    }
}

/// Limits applied to remote calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Per-request timeout in milliseconds. Unset means wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

/// Gemini vision API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Base URL of the models collection
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Instruction sent with each image
    pub prompt: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            model: "gemini-pro-vision".to_string(),
            api_key: "${GEMINI_API_KEY}".to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

/// CSV export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name suggested by the save prompt
    pub default_filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_filename: "image-metadata.csv".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
