use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::strings::{id_compliant, join_content, split_fields};
use crate::tags::inline_text;
use crate::value::{Record, RenderableText, Value};

/// `@cssClass <class>  <description>` with an optional markdown body.
///
/// Results are keyed by the identifier-safe class name; a repeated class
/// overwrites the earlier one.
pub fn css_class(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    let mut classes = Record::new();
    for entry in entries {
        let Some(text) = inline_text(entry) else {
            continue;
        };
        let fields = split_fields(text);
        let class_name = &fields[0];

        let mut record = Record::new();
        record.insert("name".to_string(), Value::from(class_name.as_str()));
        record.insert(
            "description".to_string(),
            fields
                .get(1)
                .map(|description| RenderableText::new(description.as_str()).into())
                .unwrap_or(Value::Null),
        );
        if !entry.content.is_empty() {
            record.insert(
                "content".to_string(),
                RenderableText::new(join_content(&entry.content)).into(),
            );
        }
        classes.insert(id_compliant(class_name), Value::Record(record));
    }
    Ok(Some(Value::Record(classes)))
}
