//! Glimpse Core - metadata generation for image collections.
//!
//! Glimpse validates a selection of images, asks a vision model for a title,
//! description and tags for each one, and exports the results as CSV or JSON.
//!
//! ```text
//! Paths → Validate → Batch (Gemini, k at a time) → ImageMetadata → CSV / JSON
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use glimpse_core::{Config, CsvExporter, GeminiClient, ImageProcessor, NoProgress};
//!
//! #[tokio::main]
//! async fn main() -> glimpse_core::Result<()> {
//!     let config = Config::load()?;
//!     let client = GeminiClient::from_config(&config, None)?;
//!     let processor = ImageProcessor::new(&config, Arc::new(client));
//!
//!     let records = processor
//!         .process_images(&["./cat.jpg", "./dog.png"], Arc::new(NoProgress))
//!         .await?;
//!     println!("{}", CsvExporter::new(&config.export).to_csv_string(&records)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod remote;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{
    ConfigError, ExportError, GlimpseError, MetadataValidationError, PipelineError,
    PipelineResult, ProcessingError, Result, ValidationSkip,
};
pub use export::{validate_records, CsvExporter, DestinationPicker, JsonFormat, RecordWriter};
pub use pipeline::{
    progress_channel, FileDiscovery, ImageProcessor, NoProgress, ProcessOptions, ProgressSink,
};
pub use remote::{GeminiClient, MetadataClient};
pub use types::{ImageMetadata, ItemOutcome, ProcessingStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
