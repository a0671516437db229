use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::strings::{join_content, split_fields};
use crate::value::{Record, Value};

fn optional_field(fields: &[String], idx: usize) -> Value {
    fields
        .get(idx)
        .map(|field| Value::from(field.as_str()))
        .unwrap_or(Value::Null)
}

/// `@example <language>  <title>  <description>` followed by the code.
///
/// Examples without any code lines are dropped.
pub fn example(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    let examples = entries
        .iter()
        .filter(|entry| !entry.trimmed_content().is_empty())
        .map(|entry| {
            let fields = entry
                .value
                .as_str()
                .map(split_fields)
                .unwrap_or_default();
            let code = join_content(&entry.content).trim().replace("\\@", "@");

            let mut record = Record::new();
            record.insert("language".to_string(), optional_field(&fields, 0));
            record.insert("title".to_string(), optional_field(&fields, 1));
            record.insert("description".to_string(), optional_field(&fields, 2));
            record.insert("code".to_string(), Value::from(code));
            Value::Record(record)
        })
        .collect();
    Ok(Some(Value::List(examples)))
}

/// `@snippet <label>` followed by the snippet body.
pub fn snippet(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    let Some(entry) = entries.first() else {
        return Ok(None);
    };
    let mut record = Record::new();
    record.insert(
        "label".to_string(),
        entry
            .value
            .as_str()
            .map(Value::from)
            .unwrap_or(Value::Bool(true)),
    );
    record.insert(
        "code".to_string(),
        Value::from(join_content(&entry.content)),
    );
    Ok(Some(Value::Record(record)))
}
