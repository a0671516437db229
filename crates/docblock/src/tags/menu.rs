use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::strings::{split_fields, url_slug};
use crate::tags::simple::entry_value;
use crate::value::{Record, Value};

/// `@menu Tree/Path  [slug]`: `{tree, slug}`.
///
/// Fields are separated by two or more spaces or a tab, so labels may
/// contain single spaces. Without an explicit slug, each path segment is
/// slugified and the segments are joined with `/`.
pub fn menu(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    let Some(entry) = entries.first() else {
        return Ok(None);
    };
    let Some(text) = entry.value.as_str().filter(|text| !text.trim().is_empty()) else {
        return Ok(Some(entry_value(entry)));
    };

    let fields = split_fields(text);
    let path = fields.first().map(String::as_str).unwrap_or_default();
    let tree: Vec<Value> = path
        .split('/')
        .map(|segment| Value::from(segment.trim()))
        .collect();
    let slug = match fields.get(1) {
        Some(slug) => slug.clone(),
        None => path
            .split('/')
            .map(url_slug)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/"),
    };

    let mut record = Record::new();
    record.insert("tree".to_string(), Value::List(tree));
    record.insert("slug".to_string(), Value::from(slug));
    Ok(Some(Value::Record(record)))
}
