//! Pre-parse block filtering on raw tag text (`filterByTag`).
//!
//! Filters scan the raw comment with a regex per tag instead of running the
//! segmenter, so excluded blocks are never interpreted.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{DocblockError, Result};

/// Matches the trimmed inline text of one tag.
#[derive(Clone)]
pub enum TagMatcher {
    Exact(String),
    Regex(Regex),
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl TagMatcher {
    pub fn predicate(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Regex)
            .map_err(|err| DocblockError::config(format!("invalid filter regex '{pattern}': {err}")))
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Exact(expected) => value == expected,
            Self::Regex(regex) => regex.is_match(value),
            Self::Predicate(predicate) => predicate(value),
        }
    }

    /// A string is an exact match, `{"regex": "..."}` a regular expression.
    fn from_json(tag: &str, json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::String(expected) => Ok(Self::Exact(expected.clone())),
            serde_json::Value::Object(map) => match map.get("regex") {
                Some(serde_json::Value::String(pattern)) => Self::regex(pattern),
                _ => Err(unsupported_matcher(tag)),
            },
            _ => Err(unsupported_matcher(tag)),
        }
    }
}

fn unsupported_matcher(tag: &str) -> DocblockError {
    DocblockError::config(format!(
        "the filterByTag filter for '{tag}' must be a string, a regex or a predicate"
    ))
}

impl fmt::Debug for TagMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(expected) => f.debug_tuple("Exact").field(expected).finish(),
            Self::Regex(regex) => f.debug_tuple("Regex").field(&regex.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[derive(Debug, Clone)]
struct TagRule {
    scan: Regex,
    matchers: Vec<TagMatcher>,
}

/// Tag name → matchers. Every tag must match (AND); within a tag any
/// matcher may match (OR).
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    rules: IndexMap<String, TagRule>,
}

impl TagFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a matcher for `tag`.
    pub fn with(mut self, tag: &str, matcher: TagMatcher) -> Result<Self> {
        self.push(tag, matcher)?;
        Ok(self)
    }

    fn push(&mut self, tag: &str, matcher: TagMatcher) -> Result<()> {
        if let Some(rule) = self.rules.get_mut(tag) {
            rule.matchers.push(matcher);
            return Ok(());
        }
        let scan = Regex::new(&format!(r"@{}([^\n]+)", regex::escape(tag)))
            .map_err(|err| DocblockError::config(format!("invalid filter tag '{tag}': {err}")))?;
        self.rules.insert(
            tag.to_string(),
            TagRule {
                scan,
                matchers: vec![matcher],
            },
        );
        Ok(())
    }

    /// Build from the serialized `filterByTag` shape: a matcher or a list of
    /// matchers per tag.
    pub fn from_json(config: &IndexMap<String, serde_json::Value>) -> Result<Self> {
        let mut filter = Self::new();
        for (tag, json) in config {
            match json {
                serde_json::Value::Array(items) => {
                    for item in items {
                        filter.push(tag, TagMatcher::from_json(tag, item)?)?;
                    }
                }
                other => filter.push(tag, TagMatcher::from_json(tag, other)?)?,
            }
        }
        Ok(filter)
    }

    /// Append every rule of `other`.
    pub fn merge(mut self, other: TagFilter) -> Self {
        for (tag, rule) in other.rules {
            match self.rules.get_mut(&tag) {
                Some(existing) => existing.matchers.extend(rule.matchers),
                None => {
                    self.rules.insert(tag, rule);
                }
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether a raw comment passes every rule.
    pub fn matches(&self, comment: &str) -> bool {
        self.rules.iter().all(|(tag, rule)| {
            let value = rule
                .scan
                .captures(comment)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .filter(|value| !value.is_empty());
            let Some(value) = value else {
                tracing::debug!(tag = %tag, "Block excluded: filtered tag is missing");
                return false;
            };
            rule.matchers.iter().any(|matcher| matcher.matches(value))
        })
    }
}
