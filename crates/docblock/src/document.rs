//! Document parsing: every docblock of a source text.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::block::DocblockBlock;
use crate::context::ParseContext;
use crate::error::{DocblockError, Result};
use crate::filter::TagFilter;
use crate::package::PackageMetadata;
use crate::settings::DocblockOptions;
use crate::sort::{heuristic, stable_sort};
use crate::value::{Record, Value};

// `/** ... */`, optionally preceded by a quote on the same line.
static RE_DOCBLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(['"`][ \t]*)?(/\*\*)([\s\S]+?)(\*/)"#).expect("valid docblock regex")
});

/// Extract candidate docblock comments from a source text.
///
/// Matches opened by a quote (comments inside string literals) are dropped,
/// as are comments containing a line that starts with `//`.
pub fn extract_comments(text: &str) -> Vec<String> {
    RE_DOCBLOCK
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|candidate| !candidate.starts_with(['\'', '"', '`']))
        .filter(|candidate| {
            !candidate
                .lines()
                .any(|line| line.trim_start().starts_with("//"))
        })
        .map(str::to_string)
        .collect()
}

/// A parsed source text: an ordered list of [`DocblockBlock`]s.
#[derive(Debug, Clone)]
pub struct Docblock {
    source: String,
    options: DocblockOptions,
    blocks: Option<Vec<DocblockBlock>>,
}

impl Docblock {
    /// Parse docblocks out of a source string.
    pub fn new(source: impl Into<String>, options: DocblockOptions) -> Self {
        Self {
            source: source.into(),
            options,
            blocks: None,
        }
    }

    /// Read `path` and remember it as `file_path`.
    ///
    /// When no package metadata was given, the closest `package.json` is used.
    pub fn from_path(path: impl AsRef<Path>, options: DocblockOptions) -> Result<Self> {
        Self::read_path(path.as_ref(), options)
    }

    #[cfg(target_family = "wasm")]
    fn read_path(path: &Path, _options: DocblockOptions) -> Result<Self> {
        Err(DocblockError::FilesystemUnavailable {
            path: path.to_path_buf(),
        })
    }

    #[cfg(not(target_family = "wasm"))]
    fn read_path(path: &Path, mut options: DocblockOptions) -> Result<Self> {
        if !path.exists() {
            return Err(DocblockError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        let source = std::fs::read_to_string(path).map_err(|error| DocblockError::Io {
            path: path.to_path_buf(),
            error,
        })?;

        if options.package.is_none() {
            options.package = match PackageMetadata::find_for(path) {
                Ok(package) => package,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "Ignoring unreadable package metadata");
                    None
                }
            };
        }
        options.settings.file_path = Some(path.to_path_buf());
        Ok(Self::new(source, options))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> &DocblockOptions {
        &self.options
    }

    /// Extract, filter, interpret and sort every docblock of the source.
    ///
    /// Blocks are interpreted one after the other in source order. Calling
    /// `parse` again starts from scratch.
    pub async fn parse(&mut self) -> Result<&[DocblockBlock]> {
        let settings = &self.options.settings;

        let mut tag_filter = TagFilter::from_json(&settings.filter_by_tag)?;
        if let Some(extra) = &self.options.tag_filter {
            tag_filter = tag_filter.merge(extra.clone());
        }

        let registry = if settings.tags.is_empty() {
            Arc::clone(&self.options.registry)
        } else {
            Arc::new((*self.options.registry).clone().with_aliases(&settings.tags)?)
        };

        let context = ParseContext::from_settings(settings)
            .with_package(self.options.package.clone())
            .with_collaborators(self.options.collaborators.clone());

        let candidates = extract_comments(&self.source);
        let total = candidates.len();

        let mut blocks = Vec::with_capacity(total);
        for candidate in candidates {
            if !tag_filter.is_empty() && !tag_filter.matches(&candidate) {
                continue;
            }
            let mut block = DocblockBlock::new(&candidate, Arc::clone(&registry), context.clone());
            block.parse().await;
            blocks.push(block);
        }

        if let Some(predicate) = &self.options.filter {
            blocks.retain(|block| {
                block
                    .to_object()
                    .map(|record| predicate(record, block))
                    .unwrap_or(false)
            });
        }

        tracing::debug!(
            file = ?settings.file_path,
            candidates = total,
            blocks = blocks.len(),
            "Parsed docblocks"
        );

        let blocks = self.blocks.insert(blocks);
        match &self.options.sort {
            Some(compare) => sort_blocks(blocks, |a, b| compare(a, b)),
            None => sort_blocks(blocks, heuristic),
        }
        Ok(blocks.as_slice())
    }

    /// The parsed blocks, in sort order.
    pub fn blocks(&self) -> Result<&[DocblockBlock]> {
        self.blocks
            .as_deref()
            .ok_or(DocblockError::NotParsed { what: "docblock document" })
    }

    /// Re-sort the parsed blocks with the configured (or default) comparator.
    pub fn sort(&mut self) -> Result<&mut Self> {
        match self.options.sort.clone() {
            Some(compare) => self.sort_with(move |a, b| compare(a, b)),
            None => self.sort_with(heuristic),
        }
    }

    /// Re-sort the parsed blocks with `compare`.
    pub fn sort_with(&mut self, compare: impl Fn(&Record, &Record) -> Ordering) -> Result<&mut Self> {
        let blocks = self
            .blocks
            .as_mut()
            .ok_or(DocblockError::NotParsed { what: "docblock document" })?;
        sort_blocks(blocks, compare);
        Ok(self)
    }

    /// Plain records of every block.
    pub fn to_object(&self) -> Result<Vec<&Record>> {
        self.blocks()?.iter().map(DocblockBlock::to_object).collect()
    }

    /// The plain records as a JSON array.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let records = self.to_object()?;
        Ok(serde_json::Value::Array(
            records
                .into_iter()
                .map(|record| Value::Record(record.clone()).to_json())
                .collect(),
        ))
    }

    /// Every block's normalized comment, joined by newlines.
    pub fn to_text(&self) -> Result<String> {
        Ok(self
            .blocks()?
            .iter()
            .map(DocblockBlock::to_text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn sort_blocks(blocks: &mut [DocblockBlock], compare: impl Fn(&Record, &Record) -> Ordering) {
    stable_sort(blocks, |a, b| match (a.to_object(), b.to_object()) {
        (Ok(a), Ok(b)) => compare(a, b),
        _ => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
const banner = "/** not a docblock */";

/**
 * @name        first
 * @status      beta
 */
function first() {}

// an example kept in a line comment:
/**
// * @name ignored
 */

/**
 * @name        second
 * @status      wip
 */
function second() {}
"#;

    #[test]
    fn extraction_skips_strings_and_commented_blocks() {
        let comments = extract_comments(SOURCE);
        assert_eq!(comments.len(), 2);
        assert!(comments[0].contains("@name        first"));
        assert!(comments[1].contains("@name        second"));
    }

    #[test]
    fn quote_on_previous_line_does_not_hide_comment() {
        let comments = extract_comments("import { run } from './run'\n\n/**\n * @name kept\n */");
        assert_eq!(comments, ["/**\n * @name kept\n */"]);
    }

    #[tokio::test]
    async fn results_require_parse() {
        let doc = Docblock::new(SOURCE, DocblockOptions::new());
        assert!(matches!(doc.blocks(), Err(DocblockError::NotParsed { .. })));
        assert!(doc.to_object().is_err());
        assert!(doc.to_text().is_err());
    }

    #[tokio::test]
    async fn keeps_source_order_with_identity_sort() {
        let mut doc = Docblock::new(SOURCE, DocblockOptions::new().with_sort(|_, _| Ordering::Equal));
        doc.parse().await.unwrap();
        let names: Vec<_> = doc
            .to_object()
            .unwrap()
            .into_iter()
            .map(|record| record["name"].clone())
            .collect();
        assert_eq!(names, [Value::from("first"), Value::from("second")]);
    }

    #[tokio::test]
    async fn sort_with_reorders() {
        let mut doc = Docblock::new(SOURCE, DocblockOptions::new().with_sort(|_, _| Ordering::Equal));
        doc.parse().await.unwrap();
        doc.sort_with(|a, b| b["name"].as_str().cmp(&a["name"].as_str()))
            .unwrap();
        assert_eq!(doc.blocks().unwrap()[0].to_object().unwrap()["name"], Value::from("second"));
    }

    #[test]
    fn missing_path_is_reported() {
        let err = Docblock::from_path("/definitely/not/here.ts", DocblockOptions::new()).unwrap_err();
        assert!(matches!(err, DocblockError::SourceNotFound { .. }));
    }
}
