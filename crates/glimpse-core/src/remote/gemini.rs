//! Gemini vision client using the `generateContent` API.
//!
//! Sends the instruction and the base64 image as inline data in a single
//! content block and reads the answer from the first candidate.

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::{parse_generated, ImageInput, MetadataClient};
use crate::config::{Config, GeminiConfig};
use crate::error::{ConfigError, ProcessingError};
use crate::types::ImageMetadata;

/// Gemini client. Cheap to share behind an `Arc`.
pub struct GeminiClient {
    url: String,
    api_key: String,
    prompt: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, api_key: &str) -> Self {
        Self {
            url: format!(
                "{}/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            ),
            api_key: api_key.to_string(),
            prompt: config.prompt.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from the full config, resolving the API key.
    ///
    /// `api_key_override` takes precedence over the configured key.
    pub fn from_config(config: &Config, api_key_override: Option<&str>) -> Result<Self, ConfigError> {
        let api_key = api_key_override
            .map(String::from)
            .or_else(|| config.api_key())
            .ok_or_else(|| {
                ConfigError::ValidationError(
                    "Gemini API key not set. Set GEMINI_API_KEY or run `glimpse config set-key`."
                        .to_string(),
                )
            })?;
        Ok(Self::new(&config.gemini, &api_key))
    }

    fn request_body(&self, image: ImageInput) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: self.prompt.clone(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type,
                            data: image.data,
                        },
                    },
                ],
            }],
        }
    }
}

// --- Request types ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

// --- Response types ---

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`, if present.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[async_trait]
impl MetadataClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn fetch_metadata(&self, path: &Path) -> Result<ImageMetadata, ProcessingError> {
        let image = ImageInput::read(path).await?;
        let body = self.request_body(image);
        let start = Instant::now();

        let resp = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProcessingError::Request {
                path: path.to_path_buf(),
                message: format!("Gemini request failed: {}", e.without_url()),
                status_code: None,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ProcessingError::Request {
                path: path.to_path_buf(),
                message: format!("Gemini HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        let generated: GenerateResponse =
            resp.json().await.map_err(|e| ProcessingError::MissingContent {
                path: path.to_path_buf(),
                message: format!("unreadable response body: {}", e.without_url()),
            })?;

        let text = generated
            .first_text()
            .ok_or_else(|| ProcessingError::MissingContent {
                path: path.to_path_buf(),
                message: "no candidates[0].content.parts[0].text".to_string(),
            })?;

        tracing::debug!(
            "Gemini answered for {:?} in {}ms",
            path,
            start.elapsed().as_millis()
        );

        parse_generated(&text, path)
    }
}
