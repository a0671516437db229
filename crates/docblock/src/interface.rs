//! Interface definition loading for the `@interface` tag.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;

/// A described set of fields, such as a settings object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InterfaceDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Field name to field description (`type`, `description`, `default`, ...).
    #[serde(default)]
    pub definition: IndexMap<String, serde_json::Value>,
}

/// Loads an interface definition referenced by `@interface path [export]`.
#[async_trait]
pub trait InterfaceLoader: Send + Sync {
    /// `path` is already resolved against the documented file's folder.
    async fn load(&self, path: &Path, export: &str) -> anyhow::Result<Option<InterfaceDefinition>>;
}

/// Loads interface definitions from JSON files.
///
/// `path`, `path.json` and `path/index.json` are tried in that order. A file may
/// hold a single definition or an object of named exports, in which case
/// `export` selects one (`default` falls back to the whole file).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonInterfaceLoader;

impl JsonInterfaceLoader {
    fn candidates(path: &Path) -> [PathBuf; 3] {
        let mut with_extension = path.as_os_str().to_owned();
        with_extension.push(".json");
        [
            path.to_path_buf(),
            PathBuf::from(with_extension),
            path.join("index.json"),
        ]
    }
}

#[async_trait]
impl InterfaceLoader for JsonInterfaceLoader {
    async fn load(&self, path: &Path, export: &str) -> anyhow::Result<Option<InterfaceDefinition>> {
        let Some(file) = Self::candidates(path).into_iter().find(|p| p.is_file()) else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(&file)?;
        let json: serde_json::Value = serde_json::from_str(&text)?;

        let named = json
            .get(export)
            .filter(|named| named.get("definition").is_some())
            .cloned();
        let selected = match named {
            Some(named) => named,
            None if json.get("definition").is_some() => json,
            None => anyhow::bail!("'{}' has no interface export '{export}'", file.display()),
        };
        Ok(Some(serde_json::from_value(selected)?))
    }
}
