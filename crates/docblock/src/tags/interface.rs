use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;

use crate::context::ParseContext;
use crate::entry::{InlineValue, RawTagEntry};
use crate::registry::TagInterpreter;
use crate::tags::braced;
use crate::value::{Record, RenderableText, Value};

/// `@interface [path [export]]`: loads an interface definition and injects
/// `interface` and `definition` into the block through a `tags` bundle.
///
/// A bare tag loads the interface named after the documented file itself.
/// Relative paths resolve against the documented file's folder.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceInterpreter;

impl InterfaceInterpreter {
    fn target(entry: &RawTagEntry, file_path: Option<&Path>) -> Option<(PathBuf, String)> {
        let folder = file_path
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default();

        match &entry.value {
            InlineValue::Text(text) if !text.trim().is_empty() => {
                let text = text.trim();
                let (path, export) = text
                    .split_once(char::is_whitespace)
                    .map(|(path, export)| (path, export.trim()))
                    .unwrap_or((text, "default"));
                Some((folder.join(path), export.to_string()))
            }
            _ => {
                let stem = file_path?.file_stem()?;
                Some((folder.join(stem), "default".to_string()))
            }
        }
    }
}

/// Every string leaf becomes markdown.
fn renderable_leaves(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::String(text) => RenderableText::new(text).into(),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(renderable_leaves).collect())
        }
        serde_json::Value::Object(map) => Value::Record(
            map.into_iter()
                .map(|(key, value)| (key, renderable_leaves(value)))
                .collect(),
        ),
        other => other.into(),
    }
}

#[async_trait]
impl TagInterpreter for InterfaceInterpreter {
    async fn interpret(
        &self,
        entries: &[RawTagEntry],
        ctx: &ParseContext,
    ) -> anyhow::Result<Option<Value>> {
        let Some(entry) = entries.first() else {
            return Ok(None);
        };
        let Some((path, export)) = Self::target(entry, ctx.file_path.as_deref()) else {
            return Ok(None);
        };
        let Some(interface) = ctx.interfaces().load(&path, &export).await? else {
            tracing::debug!(path = %path.display(), "No interface definition found");
            return Ok(None);
        };

        let mut definition = Record::new();
        for (field, spec) in interface.definition {
            let value = match spec {
                serde_json::Value::Object(map) => {
                    let mut record = Record::new();
                    for (key, value) in map {
                        let value = match (key.as_str(), value) {
                            ("type", serde_json::Value::String(type_string)) => ctx
                                .types()
                                .resolve(&braced(&type_string))
                                .await
                                .with_context(|| format!("invalid type for interface field '{field}'"))?
                                .to_value(),
                            (_, value) => renderable_leaves(value),
                        };
                        record.insert(key, value);
                    }
                    Value::Record(record)
                }
                other => renderable_leaves(other),
            };
            definition.insert(field, value);
        }

        let mut summary = Record::new();
        summary.insert(
            "name".into(),
            interface.name.map(Value::from).unwrap_or(Value::Null),
        );
        summary.insert(
            "description".into(),
            interface
                .description
                .map(|description| RenderableText::new(description).into())
                .unwrap_or(Value::Null),
        );
        summary.insert("path".into(), Value::from(path.display().to_string()));
        summary.insert("export".into(), Value::from(export));

        let mut bundle = Record::new();
        bundle.insert("interface".into(), Value::Record(summary));
        bundle.insert("definition".into(), Value::Record(definition));

        let mut result = Record::new();
        result.insert("tags".into(), Value::Record(bundle));
        Ok(Some(Value::Record(result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::test_support::{bare, entry};

    fn write_interface(dir: &Path) {
        std::fs::write(
            dir.join("SettingsInterface.json"),
            r#"{
                "name": "SettingsInterface",
                "description": "Process *settings*",
                "definition": {
                    "stdio": { "type": "String|Boolean", "description": "Where to log", "default": "inherit" },
                    "throw": { "type": "Boolean", "default": false }
                }
            }"#,
        )
        .expect("write interface");
    }

    #[tokio::test]
    async fn injects_interface_and_definition() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_interface(dir.path());
        let ctx = ParseContext {
            file_path: Some(dir.path().join("SProcess.ts")),
            ..ParseContext::new()
        };

        let value = InterfaceInterpreter
            .interpret(&[entry("interface", "./SettingsInterface")], &ctx)
            .await
            .expect("interpret")
            .expect("bundle");
        let bundle = value.get("tags").expect("tags bundle");

        let interface = bundle.get("interface").expect("interface");
        assert_eq!(interface.get("name"), Some(&Value::from("SettingsInterface")));
        assert_eq!(interface.get("export"), Some(&Value::from("default")));

        let stdio = bundle.get("definition").and_then(|d| d.get("stdio")).expect("stdio");
        assert_eq!(
            stdio.get("type").and_then(|t| t.get("raw")),
            Some(&Value::from("String|Boolean"))
        );
        assert!(matches!(stdio.get("description"), Some(Value::Renderable(_))));
        assert_eq!(
            bundle
                .get("definition")
                .and_then(|d| d.get("throw"))
                .and_then(|t| t.get("default")),
            Some(&Value::Bool(false))
        );
    }

    #[tokio::test]
    async fn bare_tag_uses_file_stem() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_interface(dir.path());
        let ctx = ParseContext {
            file_path: Some(dir.path().join("SettingsInterface.ts")),
            ..ParseContext::new()
        };
        let value = InterfaceInterpreter
            .interpret(&[bare("interface")], &ctx)
            .await
            .expect("interpret");
        assert!(value.is_some());
    }

    #[tokio::test]
    async fn missing_definition_is_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = ParseContext {
            file_path: Some(dir.path().join("index.ts")),
            ..ParseContext::new()
        };
        let value = InterfaceInterpreter
            .interpret(&[entry("interface", "./Nope")], &ctx)
            .await
            .expect("interpret");
        assert_eq!(value, None);
    }
}
