//! String normalization helpers shared by the tag interpreters.

use std::sync::LazyLock;

use regex::Regex;

static RE_FIELD_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}|\t").expect("valid field separator regex"));

static RE_WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Split an inline value into fields separated by two or more spaces or a tab.
///
/// `@see https://example.com  Some description` yields the url and the
/// description. Single spaces never separate fields.
pub fn split_fields(value: &str) -> Vec<String> {
    RE_FIELD_SEPARATOR
        .split(value.trim())
        .map(str::to_string)
        .collect()
}

/// Replace every whitespace run with a single hyphen.
pub fn hyphenate_whitespace(value: &str) -> String {
    RE_WHITESPACE_RUN.replace_all(value.trim(), "-").into_owned()
}

/// Normalize to a namespace-compliant token.
///
/// Lowercase, dot-segmented, restricted to `[a-z0-9._@-]`. Disallowed
/// characters become `-`, repeated separators collapse and separators at
/// either end are dropped.
pub fn namespace_compliant(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.trim().chars() {
        let ch = if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '@' | '-') {
            ch.to_ascii_lowercase()
        } else {
            '-'
        };
        match (out.chars().last(), ch) {
            (Some('-'), '-') | (Some('.'), '.') => continue,
            // a hyphen glued to a dot is noise left by stripped characters
            (Some('.'), '-') => continue,
            (Some('-'), '.') => {
                out.pop();
                out.push('.');
            }
            _ => out.push(ch),
        }
    }
    out.trim_matches(|c| c == '-' || c == '.').to_string()
}

/// Normalize to an identifier-safe key: `[a-z0-9_-]`, everything else becomes `-`.
pub fn id_compliant(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// URL slug for one path segment: lowercase, whitespace and separators become
/// `-`, other punctuation is dropped.
pub fn url_slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.trim().chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if (ch.is_whitespace() || matches!(ch, '-' | '_' | '.')) && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// Join content lines into one text, dropping a trailing paragraph break.
pub fn join_content(lines: &[String]) -> String {
    let lines = match lines.split_last() {
        Some((last, rest)) if last.is_empty() => rest,
        _ => lines,
    };
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_fields_requires_double_space() {
        assert_eq!(
            split_fields("https://a.dev   The docs"),
            ["https://a.dev", "The docs"]
        );
        assert_eq!(split_fields("Fix the thing"), ["Fix the thing"]);
        assert_eq!(split_fields("a\tb"), ["a", "b"]);
    }

    #[test]
    fn namespace_tokens() {
        assert_eq!(namespace_compliant("foo.bar"), "foo.bar");
        assert_eq!(namespace_compliant("Shared.Tags"), "shared.tags");
        assert_eq!(namespace_compliant("my ns/deep..path."), "my-ns-deep.path");
        assert_eq!(namespace_compliant("@scope.pkg"), "@scope.pkg");
        assert_eq!(namespace_compliant("a .b"), "a.b");
    }

    #[test]
    fn identifiers() {
        assert_eq!(id_compliant("s-btn--primary"), "s-btn-primary");
        assert_eq!(id_compliant(".my_Class"), "my_class");
    }

    #[test]
    fn slugs() {
        assert_eq!(url_slug("Getting Started!"), "getting-started");
        assert_eq!(url_slug("  API_reference "), "api-reference");
    }

    #[test]
    fn hyphenates() {
        assert_eq!(hyphenate_whitespace("node  process tools"), "node-process-tools");
    }

    #[test]
    fn join_drops_trailing_break() {
        let lines = vec!["a".to_string(), String::new(), "b".to_string(), String::new()];
        assert_eq!(join_content(&lines), "a\n\nb");
    }
}
