//! Parser settings.
//!
//! [`DocblockSettings`] is the serializable part (camelCase keys, loadable from
//! a config file). [`DocblockOptions`] adds the runtime-only hooks: registry,
//! collaborators, predicate filter and comparator.

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use bon::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::block::DocblockBlock;
use crate::context::Collaborators;
use crate::filter::TagFilter;
use crate::package::PackageMetadata;
use crate::registry::TagRegistry;
use crate::renderer::MarkdownOptions;
use crate::sort::Comparator;
use crate::value::Record;

/// Serializable parser settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocblockSettings {
    /// File the parsed text comes from; relative `@interface` paths resolve against it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// Run the markdown pass over interpreted values.
    pub render_markdown: bool,

    /// Dotted paths (`*` matches one segment) whose plain strings are markdown.
    pub render_markdown_props: Vec<String>,

    /// Markdown renderer options.
    pub markdown: MarkdownOptions,

    /// Tag name → string, `{ "regex": "..." }`, or a list of those.
    pub filter_by_tag: IndexMap<String, serde_json::Value>,

    /// Extra tag names mapped to a registered interpreter name.
    pub tags: IndexMap<String, String>,
}

impl DocblockSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_render_markdown(mut self, enabled: bool) -> Self {
        self.render_markdown = enabled;
        self
    }

    pub fn with_render_markdown_prop(mut self, prop: impl Into<String>) -> Self {
        self.render_markdown_props.push(prop.into());
        self
    }

    pub fn with_filter_by_tag(mut self, tag: impl Into<String>, filter: serde_json::Value) -> Self {
        self.filter_by_tag.insert(tag.into(), filter);
        self
    }

    pub fn with_tag_alias(mut self, tag: impl Into<String>, interpreter: impl Into<String>) -> Self {
        self.tags.insert(tag.into(), interpreter.into());
        self
    }
}

/// Predicate over parsed blocks: `(plain object, block) -> keep`.
pub type BlockPredicate = Arc<dyn Fn(&Record, &DocblockBlock) -> bool + Send + Sync>;

/// Everything a [`Docblock`](crate::Docblock) parse needs.
#[derive(Clone, Builder)]
pub struct DocblockOptions {
    #[builder(default)]
    pub settings: DocblockSettings,

    /// Interpreter table shared by every block.
    #[builder(default = Arc::new(TagRegistry::builtin()))]
    pub registry: Arc<TagRegistry>,

    #[builder(default)]
    pub collaborators: Collaborators,

    /// Package metadata; looked up from `file_path` when parsing a path.
    pub package: Option<PackageMetadata>,

    /// Programmatic tag filters, combined with `settings.filter_by_tag`.
    pub tag_filter: Option<TagFilter>,

    /// Keeps only the blocks for which the predicate holds.
    pub filter: Option<BlockPredicate>,

    /// Replaces the default heuristic ordering.
    pub sort: Option<Comparator>,
}

impl Default for DocblockOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for DocblockOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocblockOptions")
            .field("settings", &self.settings)
            .field("registry", &self.registry)
            .field("package", &self.package)
            .field("tag_filter", &self.tag_filter)
            .field("filter", &self.filter.is_some())
            .field("sort", &self.sort.is_some())
            .finish()
    }
}

impl DocblockOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: DocblockSettings) -> Self {
        Self::builder().settings(settings).build()
    }

    pub fn with_filter(
        mut self,
        filter: impl Fn(&Record, &DocblockBlock) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    pub fn with_sort(
        mut self,
        sort: impl Fn(&Record, &Record) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.sort = Some(Arc::new(sort));
        self
    }

    pub fn with_tag_filter(mut self, tag_filter: TagFilter) -> Self {
        self.tag_filter = Some(tag_filter);
        self
    }

    pub fn with_registry(mut self, registry: TagRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }
}
