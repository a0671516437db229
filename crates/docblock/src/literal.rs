//! Literal parsing for `@param {Type}  [name=default]` defaults.

use crate::value::Value;

/// Parses a JS-like literal into a [`Value`].
///
/// Returning `None` keeps the default as its source text.
pub trait LiteralParser: Send + Sync {
    fn parse(&self, text: &str) -> Option<Value>;
}

/// Literal parser accepting JSON, single-quoted strings and `undefined`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLiteralParser;

impl LiteralParser for JsonLiteralParser {
    fn parse(&self, text: &str) -> Option<Value> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text == "undefined" || text == "null" {
            return Some(Value::Null);
        }
        if let Some(inner) = text
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
            .or_else(|| text.strip_prefix('`').and_then(|rest| rest.strip_suffix('`')))
        {
            return Some(Value::from(inner.replace("\\'", "'")));
        }
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(text) {
            return Some(parsed.into());
        }
        // single-quoted strings inside arrays and objects
        if text.starts_with('[') || text.starts_with('{') {
            let swapped = text.replace('\'', "\"");
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&swapped) {
                return Some(parsed.into());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        let parser = JsonLiteralParser;
        assert_eq!(parser.parse("true"), Some(Value::Bool(true)));
        assert_eq!(parser.parse("'hello'"), Some(Value::from("hello")));
        assert_eq!(parser.parse("undefined"), Some(Value::Null));
        assert_eq!(
            parser.parse("42").map(|v| v.to_json()),
            Some(serde_json::json!(42))
        );
    }

    #[test]
    fn parses_collections() {
        let parser = JsonLiteralParser;
        assert_eq!(
            parser.parse("['a', 'b']").map(|v| v.to_json()),
            Some(serde_json::json!(["a", "b"]))
        );
        assert_eq!(
            parser.parse("{}").map(|v| v.to_json()),
            Some(serde_json::json!({}))
        );
    }

    #[test]
    fn unknown_syntax_is_none() {
        assert_eq!(JsonLiteralParser.parse("process.cwd()"), None);
    }
}
