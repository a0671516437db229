//! Docblock segmentation: a line-by-line state machine.
//!
//! Splits one normalized comment into ordered [`RawTagEntry`] values. Lines are
//! classified in priority order: blank marker, tag start, implicit description
//! start, plain content.

use std::sync::LazyLock;

use regex::Regex;

use crate::entry::{InlineValue, RawTagEntry, TagEntries};

/// Name of the implicit tag opened by free text.
pub const DESCRIPTION_TAG: &str = "description";

// -- Regex patterns -----------------------------------------------------------

static RE_STAR_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]\*\s").expect("valid star break regex"));

// `* @name value`, `*@name`, or a bare `* @name` at the end of the line.
static RE_TAG_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\s?@([a-zA-Z0-9]+)(?:\s+|$)").expect("valid tag start regex")
});

// -- Normalization ------------------------------------------------------------

/// Normalize a raw comment before segmentation.
///
/// Breaks the line before every ` * ` sequence, trims every line, drops empty
/// lines and puts the opening `/**` and closing `*/` markers on their own
/// lines. Whatever preceded `*/` stays as is, so a multi-line comment keeps an
/// empty line before it. The result is also the `raw` text of the interpreted
/// block and the input of its hashed id.
pub fn normalize(source: &str) -> String {
    let broken = RE_STAR_BREAK.replace_all(source.trim(), "\n * ");
    let joined = broken
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let opened = match joined.strip_prefix("/**") {
        Some(rest) => format!("/**\n*{rest}"),
        None => joined,
    };
    match opened.strip_suffix("*/") {
        Some(rest) => format!("{rest}\n*/"),
        None => opened,
    }
}

// -- Segmenter state ----------------------------------------------------------

#[derive(Default)]
struct Segmenter {
    entries: TagEntries,
    current: Option<RawTagEntry>,
    content: Vec<String>,
    previous_was_blank: bool,
}

impl Segmenter {
    fn process_line(&mut self, line: &str) {
        // 1. Blank marker line
        if line.replacen('*', "", 1).trim().is_empty() {
            if !self.content.is_empty() {
                self.content.push(String::new());
            } else {
                if self.current.is_some() {
                    self.commit();
                }
                self.previous_was_blank = true;
            }
            return;
        }

        // 2. Tag start
        if let Some(caps) = RE_TAG_START.captures(line) {
            self.commit();
            let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
            let mut rest = String::with_capacity(line.len());
            rest.push_str(&line[..whole.start]);
            rest.push_str(&line[whole.end..]);
            let rest = rest.trim();
            let value = if rest.is_empty() {
                InlineValue::Bare
            } else {
                InlineValue::Text(rest.to_string())
            };
            self.current = Some(RawTagEntry::new(&caps[1], value));
            self.previous_was_blank = false;
            return;
        }

        // 3. Free text after a blank line opens the implicit description
        if self.previous_was_blank && line.trim() != "*/" {
            self.commit();
            self.current = Some(RawTagEntry::new(DESCRIPTION_TAG, InlineValue::Bare));
            self.content = vec![strip_comment_markers(line)];
            self.previous_was_blank = false;
            return;
        }

        // 4. Plain content
        let text = strip_comment_markers(line);
        if text.trim().is_empty() {
            return;
        }
        if self.current.is_none() {
            self.current = Some(RawTagEntry::new(DESCRIPTION_TAG, InlineValue::Bare));
        }
        self.content.push(text);
    }

    /// Close the open tag and file it under its name.
    fn commit(&mut self) {
        let Some(mut entry) = self.current.take() else {
            return;
        };
        if !self.content.is_empty() {
            entry.content = std::mem::take(&mut self.content);
        }
        self.entries.push(entry);
    }

    fn finish(mut self) -> TagEntries {
        self.commit();
        self.entries
    }
}

/// Strip `/**`, `*/`, a leading `* ` / `*` and unescape `\@`.
fn strip_comment_markers(line: &str) -> String {
    let text = line.strip_prefix("/**").unwrap_or(line);
    let text = text.strip_suffix("*/").unwrap_or(text);
    let text = text
        .strip_prefix("* ")
        .or_else(|| text.strip_prefix('*'))
        .unwrap_or(text);
    text.replace("\\@", "@")
}

// -- Public API ---------------------------------------------------------------

/// Segment an already normalized comment (see [`normalize`]).
pub fn segment(normalized: &str) -> TagEntries {
    let mut state = Segmenter::default();
    normalized
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .for_each(|line| state.process_line(line));
    state.finish()
}

/// Normalize then segment a raw comment.
pub fn segment_source(source: &str) -> TagEntries {
    segment(&normalize(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> InlineValue {
        InlineValue::Text(value.to_string())
    }

    #[test]
    fn normalize_wraps_markers() {
        let normalized = normalize("  /**\n   * @name   Foo\n   */  ");
        assert_eq!(normalized, "/**\n*\n* @name   Foo\n\n*/");
    }

    #[test]
    fn normalize_single_line_comment() {
        assert_eq!(normalize("/** Hello */"), "/**\n* Hello \n*/");
    }

    #[test]
    fn segments_tags_and_description() {
        let entries = segment_source(
            r#"/**
             * @name            SProcessPipe
             * @namespace       node.process
             *
             * This class handles process pipes.
             * A pipe runs processes one after the other.
             *
             * @since           2.0.0
             */"#,
        );
        let tags: Vec<_> = entries.tags().collect();
        assert_eq!(tags, ["name", "namespace", "description", "since"]);
        assert_eq!(entries.get("name").unwrap()[0].value, text("SProcessPipe"));
        let description = &entries.get("description").unwrap()[0];
        assert_eq!(description.value, InlineValue::Bare);
        assert_eq!(
            description.trimmed_content(),
            [
                "This class handles process pipes.".to_string(),
                "A pipe runs processes one after the other.".to_string(),
            ]
        );
    }

    #[test]
    fn bare_tag_at_end_of_line() {
        let entries = segment_source("/**\n * @name foo\n * @static\n */");
        let entry = &entries.get("static").unwrap()[0];
        assert_eq!(entry.value, InlineValue::Bare);
        assert!(entry.content.is_empty());
    }

    #[test]
    fn repeated_tags_keep_source_order() {
        let entries = segment_source(
            "/**\n * @see https://a.dev  First\n * @name x\n * @see https://b.dev  Second\n */",
        );
        let see = entries.get("see").unwrap();
        assert_eq!(see.len(), 2);
        assert_eq!(see[0].value, text("https://a.dev  First"));
        assert_eq!(see[1].value, text("https://b.dev  Second"));
        assert_eq!(entries.tags().collect::<Vec<_>>(), ["see", "name"]);
    }

    #[test]
    fn paragraph_breaks_are_preserved() {
        let entries = segment_source(
            "/**\n * @example js\n * const a = 1;\n *\n * const b = 2;\n *\n * @since 1.0.0\n */",
        );
        let example = &entries.get("example").unwrap()[0];
        assert_eq!(
            example.content,
            ["const a = 1;", "", "const b = 2;", ""].map(String::from)
        );
        assert_eq!(example.trimmed_content().len(), 3);
    }

    #[test]
    fn content_keeps_indentation_and_unescapes_at() {
        let entries = segment_source(
            "/**\n * @example js\n * if (a) {\n *    run('\\@scope/pkg');\n * }\n */",
        );
        let example = &entries.get("example").unwrap()[0];
        assert_eq!(example.content[1], "   run('@scope/pkg');");
    }

    #[test]
    fn single_line_comment_becomes_description() {
        let entries = segment_source("/** Hello world */");
        let description = &entries.get("description").unwrap()[0];
        assert_eq!(description.content, ["Hello world".to_string()]);
    }

    #[test]
    fn empty_comment_has_no_entries() {
        assert!(segment_source("/** */").is_empty());
        assert!(segment_source("/**\n *\n */").is_empty());
    }
}
