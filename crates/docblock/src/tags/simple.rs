use crate::context::ParseContext;
use crate::entry::{InlineValue, RawTagEntry};
use crate::value::Value;

/// Tags interpreted by [`simple_value`] out of the box.
pub const SIMPLE_VALUE_TAGS: &[&str] = &[
    "abstract", "final", "async", "generator", "global", "constructor", "hideconstructor",
    "ignore", "inheritdoc", "inner", "instance", "mixin", "override", "access", "category",
    "copyright", "deprecated", "alias", "augments", "callback", "class", "classdesc", "constant",
    "constructs", "default", "exports", "external", "host", "file", "function", "func", "method",
    "implements", "kind", "lends", "license", "memberof", "mixes", "module", "name", "as",
    "package", "private", "protected", "public", "readonly", "requires", "since", "static",
    "summary", "this", "tutorial", "variation", "version", "enum", "src", "import",
];

/// The inline value, or `true` for bare and blank tags.
pub(crate) fn entry_value(entry: &RawTagEntry) -> Value {
    match &entry.value {
        InlineValue::Text(text) if !text.trim().is_empty() => Value::from(text.as_str()),
        _ => Value::Bool(true),
    }
}

/// Default interpreter: the first occurrence's inline value.
pub fn simple_value(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    Ok(entries.first().map(entry_value))
}

/// Every occurrence's inline value, as a list.
pub fn simple_repeatable_value(
    entries: &[RawTagEntry],
    _ctx: &ParseContext,
) -> anyhow::Result<Option<Value>> {
    Ok(Some(Value::List(entries.iter().map(entry_value).collect())))
}
