//! Block assembly: one comment to one interpreted record.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::context::ParseContext;
use crate::diagnostics::TagFailure;
use crate::entry::{RawTagEntry, TagEntries};
use crate::error::{DocblockError, Result};
use crate::registry::{TagInterpreter, TagRegistry};
use crate::render::render_value;
use crate::segmenter::{normalize, segment};
use crate::strings::namespace_compliant;
use crate::tags::simple_value;
use crate::value::{Record, Value};

/// Tag that interpreters use to inject several top-level keys at once.
const BUNDLE_KEY: &str = "tags";

/// Tag names always interpreted as simple values.
const RESERVED_SIMPLE_TAGS: &[&str] = &["src"];

/// What one tag contributes to the block.
enum TagOutput {
    Value(Value),
    /// Keys spliced directly into the block.
    Bundle(Record),
}

/// One docblock comment.
///
/// The source is normalized on construction. Interpretation happens in
/// [`parse`](Self::parse); until then [`to_object`](Self::to_object) fails.
#[derive(Debug, Clone)]
pub struct DocblockBlock {
    source: String,
    registry: Arc<TagRegistry>,
    context: ParseContext,
    parsed: Option<Record>,
}

impl DocblockBlock {
    pub fn new(source: &str, registry: Arc<TagRegistry>, context: ParseContext) -> Self {
        Self {
            source: normalize(source),
            registry,
            context,
            parsed: None,
        }
    }

    /// A block interpreted with the built-in registry and default context.
    pub async fn parse_source(source: &str) -> Record {
        let mut block = Self::new(source, Arc::new(TagRegistry::builtin()), ParseContext::new());
        block.parse().await.clone()
    }

    /// The normalized comment text.
    pub fn raw(&self) -> &str {
        &self.source
    }

    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    /// Raw tag entries of this comment.
    pub fn entries(&self) -> TagEntries {
        segment(&self.source)
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.is_some()
    }

    /// Segment and interpret the comment. Parsing again recomputes the record.
    pub async fn parse(&mut self) -> &Record {
        let entries = self.entries();
        let record = assemble(&entries, &self.source, &self.registry, &self.context).await;
        self.parsed.insert(record)
    }

    /// The interpreted record.
    pub fn to_object(&self) -> Result<&Record> {
        self.parsed
            .as_ref()
            .ok_or(DocblockError::NotParsed { what: "docblock block" })
    }

    /// The normalized comment text, the inverse projection of [`to_object`](Self::to_object).
    pub fn to_text(&self) -> &str {
        &self.source
    }
}

/// Interpret segmented entries into the final record.
///
/// Tags are interpreted strictly in first-seen order, one at a time, each
/// result merged into the accumulated record before the next tag runs.
pub async fn assemble(
    entries: &TagEntries,
    raw: &str,
    registry: &TagRegistry,
    ctx: &ParseContext,
) -> Record {
    let mut record = Record::new();

    for (tag, tag_entries) in entries.iter() {
        if record.contains_key(tag) || is_private_tag(tag) {
            continue;
        }
        let Some(output) = interpret_tag(tag, tag_entries, raw, registry, ctx).await else {
            continue;
        };
        record = merge(record, tag, output, raw, ctx);
    }

    finalize(record, raw)
}

/// Empty, single-character and `_`-prefixed names are never interpreted.
fn is_private_tag(tag: &str) -> bool {
    tag.chars().count() <= 1 || tag.starts_with('_')
}

async fn interpret_tag(
    tag: &str,
    entries: &[RawTagEntry],
    raw: &str,
    registry: &TagRegistry,
    ctx: &ParseContext,
) -> Option<TagOutput> {
    let interpreter = registry
        .get(tag)
        .filter(|_| !RESERVED_SIMPLE_TAGS.contains(&tag));

    let result = match interpreter {
        Some(interpreter) => interpreter.interpret(entries, ctx).await,
        None => simple_value.interpret(entries, ctx).await,
    };

    match result {
        Ok(Some(Value::Record(mut record))) if record.contains_key(BUNDLE_KEY) => {
            match record.shift_remove(BUNDLE_KEY) {
                Some(Value::Record(bundle)) => Some(TagOutput::Bundle(bundle)),
                Some(other) => {
                    record.insert(BUNDLE_KEY.to_string(), other);
                    Some(TagOutput::Value(Value::Record(record)))
                }
                None => Some(TagOutput::Value(Value::Record(record))),
            }
        }
        Ok(Some(value)) => Some(TagOutput::Value(value)),
        Ok(None) => None,
        Err(error) => {
            ctx.diagnostics().report(TagFailure {
                tag: tag.to_string(),
                raw: raw.to_string(),
                error: format!("{error:#}"),
            });
            None
        }
    }
}

/// Merge one tag's output. Keys already present are kept.
fn merge(mut record: Record, tag: &str, output: TagOutput, raw: &str, ctx: &ParseContext) -> Record {
    let pairs = match output {
        TagOutput::Value(value) => vec![(tag.to_string(), value)],
        TagOutput::Bundle(bundle) => bundle.into_iter().collect(),
    };

    for (key, value) in pairs {
        if record.contains_key(&key) {
            continue;
        }
        let value = if ctx.render_markdown {
            let mut path = vec![key.clone()];
            match render_value(value.clone(), &mut path, ctx) {
                Ok(rendered) => rendered,
                Err(error) => {
                    ctx.diagnostics().report(TagFailure {
                        tag: key.clone(),
                        raw: raw.to_string(),
                        error: format!("markdown rendering failed: {error:#}"),
                    });
                    value
                }
            }
        } else {
            value
        };
        record.insert(key, value);
    }
    record
}

/// Attach `raw` and compute `id` unless an explicit `@id` was given.
fn finalize(mut record: Record, raw: &str) -> Record {
    record.insert("raw".to_string(), Value::from(raw));
    if !record.contains_key("id") {
        let id = block_id(&record, raw);
        record.insert("id".to_string(), Value::from(id));
    }
    record
}

/// `namespace.name` when both are text, otherwise `s` + SHA-256 of `raw`.
pub fn block_id(record: &Record, raw: &str) -> String {
    let text = |key: &str| {
        record
            .get(key)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    };
    match (text("namespace"), text("name")) {
        (Some(namespace), Some(name)) => namespace_compliant(&format!("{namespace}.{name}")),
        _ => format!("s{:x}", Sha256::digest(raw.as_bytes())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::context::Collaborators;

    const PIPE: &str = r#"/**
     * @name            SProcessPipe
     * @namespace       node.process
     * @type            Class
     * @static
     *
     * Run processes one after the other.
     *
     * @param       {Object}        [settings={}]       Pipe settings
     * @see         https://coffeekraken.io     Website
     * @see         https://github.com/coffeekraken
     * @since       2.0.0
     * @author      Olivier Bossel <olivier.bossel@gmail.com> (https://coffeekraken.io)
     */"#;

    #[tokio::test]
    async fn assembles_a_full_block() {
        let record = DocblockBlock::parse_source(PIPE).await;

        assert_eq!(record.get("name"), Some(&Value::from("SProcessPipe")));
        assert_eq!(record.get("namespace"), Some(&Value::from("node.process")));
        assert_eq!(record.get("static"), Some(&Value::Bool(true)));
        assert_eq!(
            record.get("description").and_then(Value::as_str),
            Some("Run processes one after the other.")
        );
        assert_eq!(record.get("see").and_then(Value::as_list).map(<[Value]>::len), Some(2));
        assert_eq!(
            record.get("author").and_then(|a| a.get("email")),
            Some(&Value::from("olivier.bossel@gmail.com"))
        );
        assert_eq!(record.get("id"), Some(&Value::from("node.process.sprocesspipe")));
        assert_eq!(record.get("raw").and_then(Value::as_str), Some(normalize(PIPE).as_str()));
    }

    #[tokio::test]
    async fn to_object_requires_parse() {
        let mut block = DocblockBlock::new(PIPE, Arc::new(TagRegistry::builtin()), ParseContext::new());
        assert!(matches!(block.to_object(), Err(DocblockError::NotParsed { .. })));
        block.parse().await;
        assert!(block.to_object().is_ok());
        assert_eq!(block.to_text(), block.raw());
    }

    #[tokio::test]
    async fn hashed_id_is_stable() {
        let first = DocblockBlock::parse_source("/** Just a comment */").await;
        let second = DocblockBlock::parse_source("/** Just a comment */").await;
        let id = first.get("id").and_then(Value::as_str).unwrap();
        assert!(id.starts_with('s'));
        assert_eq!(id.len(), 65);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn explicit_id_wins() {
        let record = DocblockBlock::parse_source(
            "/**\n * @name add\n * @namespace math\n * @id custom-id\n */",
        )
        .await;
        assert_eq!(record.get("id"), Some(&Value::from("custom-id")));
    }

    #[tokio::test]
    async fn private_and_short_tags_are_skipped() {
        let record = DocblockBlock::parse_source("/**\n * @x 1\n * @name ok\n */").await;
        assert!(!record.contains_key("x"));
        assert!(record.contains_key("name"));

        assert!(is_private_tag("_internal"));
        assert!(is_private_tag(""));
        assert!(!is_private_tag("id"));
    }

    #[tokio::test]
    async fn failing_interpreter_is_reported_and_skipped() {
        let diagnostics = Arc::new(CollectingDiagnostics::new());
        let ctx = ParseContext::new().with_collaborators(
            Collaborators::builder()
                .diagnostics(diagnostics.clone())
                .build(),
        );
        let mut registry = TagRegistry::builtin();
        registry.register("status", |_: &[RawTagEntry], _: &ParseContext| -> anyhow::Result<Option<Value>> {
            anyhow::bail!("status exploded")
        });

        let mut block = DocblockBlock::new(
            "/**\n * @name sibling\n * @status beta\n * @since 1.0.0\n */",
            Arc::new(registry),
            ctx,
        );
        let record = block.parse().await;
        assert!(!record.contains_key("status"));
        assert_eq!(record.get("since"), Some(&Value::from("1.0.0")));
        assert!(record.contains_key("raw"));
        assert!(record.contains_key("id"));

        let failures = diagnostics.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].tag, "status");
        assert!(failures[0].error.contains("status exploded"));
        assert!(failures[0].raw.contains("@status beta"));
    }

    #[tokio::test]
    async fn bundles_splice_keys() {
        let mut registry = TagRegistry::builtin();
        registry.register("meta", |_: &[RawTagEntry], _: &ParseContext| -> anyhow::Result<Option<Value>> {
            let mut bundle = Record::new();
            bundle.insert("name".into(), Value::from("ignored"));
            bundle.insert("kind".into(), Value::from("widget"));
            let mut result = Record::new();
            result.insert("tags".into(), Value::Record(bundle));
            Ok(Some(Value::Record(result)))
        });
        let mut block = DocblockBlock::new(
            "/**\n * @name first\n * @meta\n */",
            Arc::new(registry),
            ParseContext::new(),
        );
        let record = block.parse().await;
        assert_eq!(record.get("name"), Some(&Value::from("first")));
        assert_eq!(record.get("kind"), Some(&Value::from("widget")));
        assert!(!record.contains_key("meta"));
    }

    #[tokio::test]
    async fn src_is_always_simple() {
        let mut registry = TagRegistry::builtin();
        registry.register("src", |_: &[RawTagEntry], _: &ParseContext| -> anyhow::Result<Option<Value>> {
            Ok(Some(Value::from("replaced")))
        });
        let mut block = DocblockBlock::new(
            "/**\n * @src ./index.ts\n */",
            Arc::new(registry),
            ParseContext::new(),
        );
        assert_eq!(block.parse().await.get("src"), Some(&Value::from("./index.ts")));
    }

    #[test]
    fn id_from_namespace_and_name() {
        let mut record = Record::new();
        record.insert("namespace".into(), Value::from("shared.tags"));
        record.insert("name".into(), Value::from("cssClass"));
        assert_eq!(block_id(&record, ""), namespace_compliant("shared.tags.cssClass"));
    }
}
