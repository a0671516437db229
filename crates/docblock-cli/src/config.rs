//! Layered configuration.
//!
//! Priority: CLI flags > `DOCBLOCK_*` environment variables > config file > defaults.
//! The config file is `--config <path>`, else `docblock.config.json` or
//! `docblock.config.toml` in the working directory.

use std::path::{Path, PathBuf};

use docblock::DocblockSettings;
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
    value::{Dict, Map, Uncased, Value},
};
use serde::{Deserialize, Serialize};

use crate::cli::ParseArgs;
use crate::error::{ConfigError, Result};

/// Config files looked up in the working directory, in order.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["docblock.config.json", "docblock.config.toml"];

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DOCBLOCK_";

/// Everything the CLI reads from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
    /// Parser settings (`renderMarkdown`, `filterByTag`, `tags`, ...).
    #[serde(flatten)]
    pub settings: DocblockSettings,

    /// Globs skipped by `docblock namespaces`.
    pub exclude: Vec<String>,
}

/// Flag values layered on top of file and environment configuration.
#[derive(Debug, Clone, Default)]
pub struct FlagOverrides {
    pub render_markdown: bool,
    pub filter_tags: Vec<(String, String)>,
    pub exclude: Vec<String>,
}

impl From<&ParseArgs> for FlagOverrides {
    fn from(args: &ParseArgs) -> Self {
        Self {
            render_markdown: args.render_markdown,
            filter_tags: args.filter_tag.clone(),
            exclude: Vec::new(),
        }
    }
}

impl FlagOverrides {
    /// Only flags that were actually given, so unset flags never mask the file.
    fn into_dict(self) -> Dict {
        let mut dict = Dict::new();
        if self.render_markdown {
            dict.insert("renderMarkdown".into(), Value::from(true));
        }
        if !self.filter_tags.is_empty() {
            let filters: Map<String, Value> = self
                .filter_tags
                .into_iter()
                .map(|(tag, value)| (tag, Value::from(value)))
                .collect();
            dict.insert("filterByTag".into(), Value::from(filters));
        }
        if !self.exclude.is_empty() {
            dict.insert("exclude".into(), Value::from(self.exclude));
        }
        dict
    }
}

impl CliConfig {
    /// Load configuration from every source, resolving default config files
    /// against `cwd`.
    pub fn load(config_path: Option<&Path>, cwd: &Path, flags: FlagOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = Self::config_file(config_path, cwd)? {
            tracing::debug!(path = %path.display(), "Loading config file");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(&path)),
                Some("toml") => figment.merge(Toml::file(&path)),
                _ => return Err(ConfigError::UnsupportedFormat(path).into()),
            };
        }

        // DOCBLOCK_RENDER_MARKDOWN=true -> renderMarkdown
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| Uncased::from_owned(camel_case(key.as_str())))
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(flags.into_dict()));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        Ok(config)
    }

    fn config_file(config_path: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
        if let Some(path) = config_path {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            return Ok(Some(path.to_path_buf()));
        }
        Ok(DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| cwd.join(name))
            .find(|path| path.is_file()))
    }
}

/// `render_markdown_props` -> `renderMarkdownProps`.
fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
