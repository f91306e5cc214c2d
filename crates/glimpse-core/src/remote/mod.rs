//! Remote metadata generation.
//!
//! A [`MetadataClient`] turns one validated image into an [`ImageMetadata`]
//! record with a single remote call. [`GeminiClient`] is the production
//! transport.
//!
//! [`ImageMetadata`]: crate::types::ImageMetadata

pub(crate) mod client;
pub(crate) mod gemini;

pub use client::{mime_type_for, parse_generated, ImageInput, MetadataClient};
pub use gemini::GeminiClient;
