use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::tags::inline_text;
use crate::value::{RenderableText, Value};

/// Implicit description, or explicit `@description` / `@desc`.
///
/// Inline text (explicit tags only) becomes the first line. Lines are trimmed
/// and joined; the result is markdown.
pub fn description(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    let Some(entry) = entries.first() else {
        return Ok(None);
    };
    let lines: Vec<&str> = inline_text(entry)
        .into_iter()
        .chain(entry.trimmed_content().iter().map(|line| line.trim()))
        .collect();
    let text = lines.join("\n").trim().to_string();
    Ok(Some(RenderableText::new(text).into()))
}
