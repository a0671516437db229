use anyhow::Context;
use async_trait::async_trait;

use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::registry::TagInterpreter;
use crate::strings::{join_content, split_fields};
use crate::tags::{braced, inline_text};
use crate::value::{Record, Value};

/// `@param {Type}  name  Description`, also `@property`, `@prop` and `@setting`.
///
/// `[name=default]` marks the parameter optional and carries a literal
/// default. Results are keyed by parameter name; the last duplicate wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamInterpreter;

struct Variable<'a> {
    name: &'a str,
    optional: bool,
    default: Option<&'a str>,
}

impl<'a> Variable<'a> {
    fn parse(spec: &'a str) -> Self {
        let Some(inner) = spec
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        else {
            return Self {
                name: spec,
                optional: false,
                default: None,
            };
        };
        match inner.split_once('=') {
            Some((name, default)) => Self {
                name: name.trim(),
                optional: true,
                default: Some(default.trim()),
            },
            None => Self {
                name: inner.trim(),
                optional: true,
                default: None,
            },
        }
    }
}

#[async_trait]
impl TagInterpreter for ParamInterpreter {
    async fn interpret(
        &self,
        entries: &[RawTagEntry],
        ctx: &ParseContext,
    ) -> anyhow::Result<Option<Value>> {
        let mut params = Record::new();

        for entry in entries {
            let Some(text) = inline_text(entry) else {
                continue;
            };
            let fields = split_fields(text);
            let Some(variable) = fields.get(1).map(|spec| Variable::parse(spec)) else {
                tracing::debug!(tag = %entry.tag, value = %text, "Skipping parameter without a name");
                continue;
            };
            if variable.name.is_empty() {
                continue;
            }

            let descriptor = ctx
                .types()
                .resolve(&braced(&fields[0]))
                .await
                .with_context(|| format!("cannot resolve the type of parameter '{}'", variable.name))?;

            let default = variable
                .default
                .map(|text| ctx.literals().parse(text).unwrap_or_else(|| Value::from(text)))
                .unwrap_or(Value::Null);

            let mut record = Record::new();
            record.insert("name".into(), Value::from(variable.name));
            record.insert("type".into(), descriptor.to_value());
            record.insert(
                "description".into(),
                fields
                    .get(2)
                    .map(|description| Value::from(description.as_str()))
                    .unwrap_or(Value::Null),
            );
            record.insert("optional".into(), Value::Bool(variable.optional));
            record.insert("default".into(), default);
            record.insert(
                "defaultStr".into(),
                Value::from(variable.default.unwrap_or_default()),
            );
            if !entry.content.is_empty() {
                record.insert("content".into(), Value::from(join_content(&entry.content)));
            }
            params.insert(variable.name.to_string(), Value::Record(record));
        }

        Ok(Some(Value::Record(params)))
    }
}
