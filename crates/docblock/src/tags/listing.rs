//! Two-field repeatable tags: `@see`, `@support`, `@platform`, `@event`, `@todo`.

use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::strings::split_fields;
use crate::tags::inline_text;
use crate::value::{Record, RenderableText, Value};

const TODO_PRIORITIES: &[&str] = &["low", "normal", "high"];

/// Build `{<primary>: fields[0], description: fields[1]}` for every entry with text.
fn two_field_list(
    entries: &[RawTagEntry],
    primary: &str,
    describe: impl Fn(Option<&str>) -> Value,
) -> Value {
    let items = entries
        .iter()
        .filter_map(inline_text)
        .map(|text| {
            let fields = split_fields(text);
            let mut record = Record::new();
            record.insert(primary.to_string(), Value::from(fields[0].as_str()));
            record.insert("description".to_string(), describe(fields.get(1).map(String::as_str)));
            Value::Record(record)
        })
        .collect();
    Value::List(items)
}

fn plain(description: Option<&str>) -> Value {
    Value::from(description.unwrap_or_default())
}

/// `@see <url>  <description>`
pub fn see(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    Ok(Some(two_field_list(entries, "url", plain)))
}

/// `@support <name>  <description>`; the description is markdown.
pub fn support(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    Ok(Some(two_field_list(entries, "name", |description| {
        RenderableText::new(description.unwrap_or_default()).into()
    })))
}

/// `@platform <name>  <description>`
pub fn platform(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    Ok(Some(two_field_list(entries, "name", plain)))
}

/// `@event <name>  <description>`; a missing description is `null`.
pub fn event(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    Ok(Some(two_field_list(entries, "name", |description| {
        description.map(Value::from).unwrap_or(Value::Null)
    })))
}

/// `@todo <description>  <priority>`, priority defaulting to `normal`.
///
/// A single-field value ending with a known priority word
/// (`@todo Fix the thing high`) also carries that priority.
pub fn todo(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    let items = entries
        .iter()
        .filter_map(inline_text)
        .map(|text| {
            let fields = split_fields(text);
            let (description, priority) = match fields.get(1) {
                Some(priority) => (fields[0].clone(), priority.clone()),
                None => split_trailing_priority(&fields[0]),
            };
            let mut record = Record::new();
            record.insert("priority".to_string(), Value::from(priority));
            record.insert("description".to_string(), Value::from(description));
            Value::Record(record)
        })
        .collect();
    Ok(Some(Value::List(items)))
}

fn split_trailing_priority(text: &str) -> (String, String) {
    if let Some((description, last)) = text.rsplit_once(char::is_whitespace) {
        let last = last.to_ascii_lowercase();
        if TODO_PRIORITIES.contains(&last.as_str()) && !description.trim().is_empty() {
            return (description.trim().to_string(), last);
        }
    }
    (text.to_string(), "normal".to_string())
}
