use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::value::{Record, Value};

// `Name <email> (url)`, every part optional.
static RE_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^<(]+?)?[ \t]*(?:<([^>(]+?)>)?[ \t]*(?:\(([^)]+?)\)|$)")
        .expect("valid author regex")
});

/// A parsed `@author` / `@contributor` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    raw: String,
}

impl Author {
    /// Parse `Name <email> (url)`. Returns `None` when nothing matched.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        let caps = RE_AUTHOR.captures(raw)?;
        let group = |idx: usize| {
            caps.get(idx)
                .map(|m| m.as_str().trim().to_string())
                .filter(|part| !part.is_empty())
        };
        let author = Self {
            name: group(1),
            email: group(2),
            url: group(3),
            raw: raw.to_string(),
        };
        if author.name.is_none() && author.email.is_none() && author.url.is_none() {
            return None;
        }
        Some(author)
    }

    /// `{name, email, url, raw}`; `raw` is the text the parts came from.
    pub fn to_value(&self) -> Value {
        let mut record = Record::new();
        for (key, part) in [("name", &self.name), ("email", &self.email), ("url", &self.url)] {
            if let Some(part) = part {
                record.insert(key.to_string(), Value::from(part.as_str()));
            }
        }
        record.insert("raw".to_string(), Value::from(self.raw.as_str()));
        Value::Record(record)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_entry(entry: &RawTagEntry) -> Option<Author> {
    entry.value.as_str().and_then(Author::parse)
}

pub fn author(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    Ok(entries
        .first()
        .and_then(parse_entry)
        .map(|author| author.to_value()))
}

/// Every `@contributor` as an author record.
pub fn contributor(entries: &[RawTagEntry], _ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    Ok(Some(Value::List(
        entries
            .iter()
            .filter_map(parse_entry)
            .map(|author| author.to_value())
            .collect(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::test_support::{bare, entry};

    #[test]
    fn parses_all_parts() {
        let author = Author::parse("Jane Doe <jane@x.com> (https://x.com)").unwrap();
        assert_eq!(author.name.as_deref(), Some("Jane Doe"));
        assert_eq!(author.email.as_deref(), Some("jane@x.com"));
        assert_eq!(author.url.as_deref(), Some("https://x.com"));
        assert_eq!(author.to_string(), "Jane Doe <jane@x.com> (https://x.com)");
    }

    #[test]
    fn parts_are_optional() {
        let author = Author::parse("Olivier Bossel <olivier.bossel@gmail.com>").unwrap();
        assert_eq!(author.name.as_deref(), Some("Olivier Bossel"));
        assert_eq!(author.url, None);

        let author = Author::parse("Jane").unwrap();
        assert_eq!(author.name.as_deref(), Some("Jane"));
        assert_eq!(author.email, None);
    }

    #[test]
    fn whitespace_yields_nothing() {
        assert_eq!(Author::parse("   "), None);
        let value = author(&[bare("author")], &ParseContext::new()).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn projects_to_record() {
        let value = author(
            &[entry("author", "Jane Doe <jane@x.com> (https://x.com)")],
            &ParseContext::new(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            value.to_json(),
            serde_json::json!({
                "name": "Jane Doe",
                "email": "jane@x.com",
                "url": "https://x.com",
                "raw": "Jane Doe <jane@x.com> (https://x.com)",
            })
        );
    }

    #[test]
    fn contributors_are_listed() {
        let entries = [
            entry("contributor", "Jane <jane@x.com>"),
            entry("contributor", "John (https://john.dev)"),
        ];
        let value = contributor(&entries, &ParseContext::new()).unwrap().unwrap();
        assert_eq!(value.as_list().map(<[Value]>::len), Some(2));
        assert_eq!(
            value.as_list().unwrap()[1].get("url"),
            Some(&Value::from("https://john.dev"))
        );
        assert_eq!(
            value.as_list().unwrap()[1].get("raw"),
            Some(&Value::from("John (https://john.dev)"))
        );
    }
}
