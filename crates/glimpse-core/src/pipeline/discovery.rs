//! Expands user selections (files and folders) into candidate image paths.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

use super::validate::Validator;

/// Turns a user selection into a flat list of candidate paths.
pub struct FileDiscovery {
    filter: Validator,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            filter: Validator::new(config),
        }
    }

    /// Expand every selected path, preserving selection order.
    ///
    /// Explicitly selected files pass through untouched so the validator can
    /// report why it rejects them; folders contribute only supported files.
    pub fn expand<P: AsRef<Path>>(&self, selection: &[P]) -> Vec<PathBuf> {
        let mut out = Vec::new();
        for path in selection {
            let path = path.as_ref();
            if path.is_dir() {
                out.extend(self.discover_dir(path));
            } else {
                out.push(path.to_path_buf());
            }
        }
        out
    }

    /// Recursively find all supported files under a directory, sorted by path.
    pub fn discover_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.filter.is_supported(e.path()))
            .map(|e| e.into_path())
            .collect();

        files.sort();
        tracing::debug!("Discovered {} image(s) under {:?}", files.len(), dir);
        files
    }
}
