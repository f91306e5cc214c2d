//! Input validation before any remote call is made.

use std::path::{Path, PathBuf};

use crate::config::ProcessingConfig;
use crate::error::ValidationSkip;

/// Filters candidate paths down to existing, non-empty, supported images.
///
/// The guarantee is time-of-check only: a file that disappears after
/// validation surfaces later as a per-image read error.
pub struct Validator {
    supported: Vec<String>,
}

impl Validator {
    /// Create a new validator accepting the configured extensions.
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            supported: config
                .supported_formats
                .iter()
                .map(|f| f.trim_start_matches('.').to_lowercase())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    /// Keep the paths that pass [`Validator::check`], in input order.
    ///
    /// Never fails; excluded paths are logged at warn level.
    pub fn validate<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<PathBuf> {
        let mut valid = Vec::with_capacity(paths.len());
        for path in paths {
            let path: &Path = path.as_ref();
            match self.check(path) {
                Ok(()) => valid.push(path.to_path_buf()),
                Err(skip) => tracing::warn!("Skipping invalid image: {skip}"),
            }
        }
        valid
    }

    /// Check a single path.
    ///
    /// Order: existence, extension, then regular-file and size checks.
    pub fn check(&self, path: &Path) -> Result<(), ValidationSkip> {
        if !path.exists() {
            return Err(ValidationSkip::NotFound(path.to_path_buf()));
        }

        if !self.is_supported(path) {
            return Err(ValidationSkip::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            });
        }

        let metadata = std::fs::metadata(path).map_err(|source| ValidationSkip::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(ValidationSkip::NotAFile(path.to_path_buf()));
        }
        if metadata.len() == 0 {
            return Err(ValidationSkip::Empty(path.to_path_buf()));
        }

        Ok(())
    }

    /// Check if a file has a supported extension (case-insensitive).
    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext_lower = ext.to_lowercase();
                self.supported.iter().any(|fmt| *fmt == ext_lower)
            })
            .unwrap_or(false)
    }
}
