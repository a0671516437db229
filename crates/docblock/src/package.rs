//! Nearest `package.json` lookup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DocblockError, Result};

/// The subset of `package.json` the interpreters read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    /// Directory holding the `package.json`.
    #[serde(skip)]
    pub root: PathBuf,
}

impl PackageMetadata {
    /// Build metadata for a package name without touching the filesystem.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Find and load the closest `package.json` at or above `path`.
    ///
    /// Returns `Ok(None)` when no ancestor directory holds one.
    pub fn find_for(path: &Path) -> Result<Option<Self>> {
        let start = if path.is_dir() {
            Some(path)
        } else {
            path.parent()
        };

        for dir in start.into_iter().flat_map(Path::ancestors) {
            let manifest = dir.join("package.json");
            if !manifest.is_file() {
                continue;
            }
            let text = std::fs::read_to_string(&manifest).map_err(|error| DocblockError::Io {
                path: manifest.clone(),
                error,
            })?;
            let mut metadata: Self = serde_json::from_str(&text)?;
            metadata.root = dir.to_path_buf();
            tracing::debug!(manifest = %manifest.display(), name = ?metadata.name, "Found package metadata");
            return Ok(Some(metadata));
        }
        Ok(None)
    }
}
