//! Raw tag entries produced by the segmenter.

use indexmap::IndexMap;

/// Inline text that followed a tag name on its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineValue {
    Text(String),
    /// The tag had no inline text (`@static`). Interprets as boolean `true`.
    Bare,
}

impl InlineValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bare => None,
        }
    }

    pub fn is_bare(&self) -> bool {
        matches!(self, Self::Bare)
    }
}

/// One occurrence of a tag inside a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTagEntry {
    pub tag: String,
    pub value: InlineValue,
    /// Continuation lines; empty strings mark paragraph breaks.
    pub content: Vec<String>,
}

impl RawTagEntry {
    pub fn new(tag: impl Into<String>, value: InlineValue) -> Self {
        Self {
            tag: tag.into(),
            value,
            content: Vec::new(),
        }
    }

    /// Content lines without a single trailing empty line left behind by a
    /// blank marker right before the tag closed.
    pub fn trimmed_content(&self) -> &[String] {
        match self.content.split_last() {
            Some((last, rest)) if last.is_empty() => rest,
            _ => &self.content,
        }
    }
}

/// All raw entries of one comment, grouped by tag name in first-seen order.
///
/// Every tag maps to a sequence; a tag that occurred once holds a single entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEntries {
    entries: IndexMap<String, Vec<RawTagEntry>>,
}

impl TagEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry under its tag name, keeping first-seen tag order.
    pub fn push(&mut self, entry: RawTagEntry) {
        self.entries.entry(entry.tag.clone()).or_default().push(entry);
    }

    pub fn get(&self, tag: &str) -> Option<&[RawTagEntry]> {
        self.entries.get(tag).map(Vec::as_slice)
    }

    /// First occurrence of a tag, the unboxed view of a non-repeated tag.
    pub fn first(&self, tag: &str) -> Option<&RawTagEntry> {
        self.entries.get(tag).and_then(|entries| entries.first())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Tag names in first-seen order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RawTagEntry])> {
        self.entries
            .iter()
            .map(|(tag, entries)| (tag.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
