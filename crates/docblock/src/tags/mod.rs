//! Built-in tag interpreters.

mod author;
mod css_class;
mod description;
mod example;
mod interface;
mod listing;
mod menu;
mod namespace;
mod param;
mod returns;
mod simple;

pub use author::{Author, author, contributor};
pub use css_class::css_class;
pub use description::description;
pub use example::{example, snippet};
pub use interface::InterfaceInterpreter;
pub use listing::{event, platform, see, support, todo};
pub use menu::menu;
pub use namespace::namespace;
pub use param::ParamInterpreter;
pub use returns::{ReturnInterpreter, TypeInterpreter};
pub use simple::{SIMPLE_VALUE_TAGS, simple_repeatable_value, simple_value};

use crate::entry::RawTagEntry;
use crate::registry::TagRegistry;

/// Register every built-in interpreter.
pub(crate) fn register_builtin(registry: &mut TagRegistry) {
    for tag in SIMPLE_VALUE_TAGS {
        registry.register(*tag, simple_value);
    }

    registry
        .register("author", author)
        .register("contributor", contributor)
        .register("install", simple_value)
        .register("feature", simple_repeatable_value)
        .register("description", description)
        .register("desc", description)
        .register("see", see)
        .register("interface", InterfaceInterpreter)
        .register("return", ReturnInterpreter)
        .register("type", TypeInterpreter)
        .register("platform", platform)
        .register("namespace", namespace)
        .register("menu", menu)
        .register("cssClass", css_class)
        .register("support", support)
        .register("snippet", snippet)
        .register("example", example)
        .register("todo", todo)
        .register("event", event);

    for tag in ["param", "property", "prop", "setting"] {
        registry.register(tag, ParamInterpreter);
    }
}

/// Inline text of an entry, `None` for bare tags and blank text.
fn inline_text(entry: &RawTagEntry) -> Option<&str> {
    entry
        .value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Wrap a type expression in braces unless it already is.
fn braced(type_string: &str) -> String {
    let trimmed = type_string.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        trimmed.to_string()
    } else {
        format!("{{{trimmed}}}")
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::entry::{InlineValue, RawTagEntry};

    pub fn entry(tag: &str, value: &str) -> RawTagEntry {
        RawTagEntry::new(tag, InlineValue::Text(value.to_string()))
    }

    pub fn entry_with_content(tag: &str, value: &str, content: &[&str]) -> RawTagEntry {
        let mut entry = entry(tag, value);
        entry.content = content.iter().map(|line| line.to_string()).collect();
        entry
    }

    pub fn bare(tag: &str) -> RawTagEntry {
        RawTagEntry::new(tag, InlineValue::Bare)
    }
}
