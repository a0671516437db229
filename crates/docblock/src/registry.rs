//! Tag name → interpreter lookup table.
//!
//! The registry is an explicit value: build it once (usually from
//! [`TagRegistry::builtin`]), extend it, then share it behind an `Arc` with
//! every parse. It is never mutated while a parse is running.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::error::{DocblockError, Result};
use crate::value::Value;

/// Turns every raw occurrence of one tag into an interpreted value.
///
/// `entries` holds at least one entry, in source order. Returning `Ok(None)`
/// leaves the tag out of the block. Errors are reported to the diagnostics
/// sink and never abort the block.
///
/// Plain functions and closures with the matching signature implement this
/// trait, so synchronous interpreters need no wrapper type.
#[async_trait]
pub trait TagInterpreter: Send + Sync {
    async fn interpret(
        &self,
        entries: &[RawTagEntry],
        ctx: &ParseContext,
    ) -> anyhow::Result<Option<Value>>;
}

#[async_trait]
impl<F> TagInterpreter for F
where
    F: Fn(&[RawTagEntry], &ParseContext) -> anyhow::Result<Option<Value>> + Send + Sync,
{
    async fn interpret(
        &self,
        entries: &[RawTagEntry],
        ctx: &ParseContext,
    ) -> anyhow::Result<Option<Value>> {
        self(entries, ctx)
    }
}

/// Mapping from tag name to interpreter.
#[derive(Clone, Default)]
pub struct TagRegistry {
    interpreters: IndexMap<String, Arc<dyn TagInterpreter>>,
}

impl TagRegistry {
    /// A registry with no interpreters: every tag falls back to simpleValue.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry with every built-in interpreter.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        crate::tags::register_builtin(&mut registry);
        registry
    }

    /// Register (or replace) the interpreter for `tag`.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        interpreter: impl TagInterpreter + 'static,
    ) -> &mut Self {
        self.register_shared(tag, Arc::new(interpreter))
    }

    pub fn register_shared(
        &mut self,
        tag: impl Into<String>,
        interpreter: Arc<dyn TagInterpreter>,
    ) -> &mut Self {
        self.interpreters.insert(tag.into(), interpreter);
        self
    }

    /// Make `tag` use the interpreter already registered under `target`.
    pub fn alias(&mut self, tag: impl Into<String>, target: &str) -> Result<&mut Self> {
        let tag = tag.into();
        let interpreter = self.interpreters.get(target).cloned().ok_or_else(|| {
            DocblockError::config(format!(
                "cannot alias tag '{tag}' to '{target}': no interpreter is registered under that name"
            ))
        })?;
        Ok(self.register_shared(tag, interpreter))
    }

    /// Apply a tag → interpreter-name alias map, as found in settings.
    pub fn with_aliases<'a>(
        mut self,
        aliases: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Result<Self> {
        for (tag, target) in aliases {
            self.alias(tag.as_str(), target)?;
        }
        Ok(self)
    }

    pub fn get(&self, tag: &str) -> Option<&Arc<dyn TagInterpreter>> {
        self.interpreters.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.interpreters.contains_key(tag)
    }

    /// Registered tag names in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.interpreters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.interpreters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interpreters.is_empty()
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRegistry")
            .field("tags", &self.interpreters.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::InlineValue;

    fn shout(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
        Ok(entries[0]
            .value
            .as_str()
            .map(|text| Value::from(text.to_uppercase())))
    }

    #[tokio::test]
    async fn functions_are_interpreters() {
        let mut registry = TagRegistry::empty();
        registry.register("status", shout);
        let entry = RawTagEntry::new("status", InlineValue::Text("beta".into()));

        let interpreter = registry.get("status").expect("registered");
        let value = interpreter
            .interpret(&[entry], &ParseContext::new())
            .await
            .expect("interpret");
        assert_eq!(value, Some(Value::from("BETA")));
    }

    #[test]
    fn alias_requires_known_target() {
        let mut registry = TagRegistry::builtin();
        registry.alias("arg", "param").expect("param is built in");
        assert!(registry.contains("arg"));

        let err = registry.alias("x", "missing").err().expect("unknown target");
        assert!(matches!(err, DocblockError::Config { .. }));
    }

    #[test]
    fn builtin_covers_structured_tags() {
        let registry = TagRegistry::builtin();
        for tag in [
            "author", "contributor", "param", "property", "prop", "setting", "return", "type",
            "see", "support", "platform", "todo", "namespace", "menu", "cssClass", "event",
            "example", "snippet", "description", "desc", "install", "feature", "interface",
            "since", "static",
        ] {
            assert!(registry.contains(tag), "missing built-in '{tag}'");
        }
    }
}
