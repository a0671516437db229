use async_trait::async_trait;

use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::registry::TagInterpreter;
use crate::strings::split_fields;
use crate::tags::{braced, inline_text};
use crate::value::{Record, Value};

/// `@return {Type}  Description` → `{type, description}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReturnInterpreter;

#[async_trait]
impl TagInterpreter for ReturnInterpreter {
    async fn interpret(
        &self,
        entries: &[RawTagEntry],
        ctx: &ParseContext,
    ) -> anyhow::Result<Option<Value>> {
        let Some(text) = entries.first().and_then(inline_text) else {
            return Ok(None);
        };
        let fields = split_fields(text);
        let descriptor = ctx.types().resolve(&braced(&fields[0])).await?;

        let mut record = Record::new();
        record.insert("type".into(), descriptor.to_value());
        record.insert(
            "description".into(),
            Value::from(fields.get(1).map(String::as_str).unwrap_or_default()),
        );
        Ok(Some(Value::Record(record)))
    }
}

/// `@type Type` → the resolved type descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeInterpreter;

#[async_trait]
impl TagInterpreter for TypeInterpreter {
    async fn interpret(
        &self,
        entries: &[RawTagEntry],
        ctx: &ParseContext,
    ) -> anyhow::Result<Option<Value>> {
        let Some(text) = entries.first().and_then(inline_text) else {
            return Ok(None);
        };
        let descriptor = ctx.types().resolve(&braced(text)).await?;
        Ok(Some(descriptor.to_value()))
    }
}
