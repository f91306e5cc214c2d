//! Metadata client trait and request helpers shared by transports.

use std::path::Path;

use async_trait::async_trait;
use base64::Engine;

use crate::error::ProcessingError;
use crate::types::{GeneratedMetadata, ImageMetadata};

/// Base64-encoded image ready to send to a vision API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
}

impl ImageInput {
    /// Encode raw bytes, picking the MIME type from the path's extension.
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type_for(path).to_string(),
        }
    }

    /// Read and encode an image file.
    pub async fn read(path: &Path) -> Result<Self, ProcessingError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ProcessingError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_bytes(&bytes, path))
    }
}

/// Static extension → MIME lookup. Unknown extensions fall back to JPEG.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        other => {
            tracing::warn!("Unknown image extension '{other}', defaulting to image/jpeg");
            "image/jpeg"
        }
    }
}

/// Parse the model's text answer into a metadata record for `path`.
///
/// Accepts bare JSON or JSON wrapped in a Markdown code fence.
pub fn parse_generated(text: &str, path: &Path) -> Result<ImageMetadata, ProcessingError> {
    let body = strip_code_fence(text);
    let generated: GeneratedMetadata =
        serde_json::from_str(body).map_err(|e| ProcessingError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(generated.into_metadata(path))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

/// Produces metadata for one validated image.
///
/// Uses `async_trait` because the scheduler holds clients as
/// `Arc<dyn MetadataClient>` and needs dynamic dispatch.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Client name for logging (e.g., "gemini").
    fn name(&self) -> &str;

    /// Generate metadata for the image at `path`.
    ///
    /// One attempt only: failures surface immediately for the caller to
    /// isolate or propagate.
    async fn fetch_metadata(&self, path: &Path) -> Result<ImageMetadata, ProcessingError>;
}
