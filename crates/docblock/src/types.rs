//! Type-string resolution for `@param`, `@return`, `@type` and interface fields.

use async_trait::async_trait;

use crate::value::{Record, Value};

/// Resolves a braced type expression such as `{String|Array<Number>}`.
#[async_trait]
pub trait TypeResolver: Send + Sync {
    async fn resolve(&self, braced: &str) -> anyhow::Result<TypeDescriptor>;
}

/// A resolved type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Expression without the surrounding braces.
    pub raw: String,
    /// Union members in source order.
    pub types: Vec<TypeRef>,
}

/// One member of a type union, with its generic arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub of: Vec<TypeRef>,
}

impl TypeDescriptor {
    pub fn to_value(&self) -> Value {
        let mut record = Record::new();
        record.insert("raw".into(), Value::from(self.raw.as_str()));
        record.insert(
            "types".into(),
            Value::List(self.types.iter().map(TypeRef::to_value).collect()),
        );
        Value::Record(record)
    }
}

impl TypeRef {
    fn to_value(&self) -> Value {
        let mut record = Record::new();
        record.insert("type".into(), Value::from(self.name.as_str()));
        if !self.of.is_empty() {
            record.insert(
                "of".into(),
                Value::List(self.of.iter().map(TypeRef::to_value).collect()),
            );
        }
        Value::Record(record)
    }
}

/// Structural resolver for JSDoc-style type strings.
///
/// Understands unions (`A|B`), generics (`Array<A, B>`), array suffixes
/// (`String[]`) and parentheses. Names are not checked against anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTypeResolver;

#[async_trait]
impl TypeResolver for BasicTypeResolver {
    async fn resolve(&self, braced: &str) -> anyhow::Result<TypeDescriptor> {
        parse_type_string(braced)
    }
}

/// Parse a type expression, with or without braces.
pub fn parse_type_string(braced: &str) -> anyhow::Result<TypeDescriptor> {
    let trimmed = braced.trim();
    let raw = trimmed
        .strip_prefix('{')
        .and_then(|inner| inner.strip_suffix('}'))
        .unwrap_or(trimmed)
        .trim();
    if !is_balanced(raw) {
        anyhow::bail!("unbalanced type expression `{raw}`");
    }
    Ok(TypeDescriptor {
        raw: raw.to_string(),
        types: parse_union(raw),
    })
}

fn parse_union(expression: &str) -> Vec<TypeRef> {
    split_top_level(expression, '|')
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_member(part.trim()))
        .collect()
}

fn parse_member(member: &str) -> TypeRef {
    if let Some(inner) = member.strip_suffix("[]") {
        return TypeRef {
            name: "Array".to_string(),
            of: parse_union(inner),
        };
    }
    if let Some(inner) = member
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return TypeRef {
            name: "Union".to_string(),
            of: parse_union(inner),
        };
    }
    if let (Some(open), true) = (member.find('<'), member.ends_with('>')) {
        let name = member[..open].trim().to_string();
        let args = &member[open + 1..member.len() - 1];
        let of = split_top_level(args, ',')
            .into_iter()
            .flat_map(|arg| parse_union(arg.trim()))
            .collect();
        return TypeRef { name, of };
    }
    TypeRef {
        name: member.to_string(),
        of: Vec::new(),
    }
}

/// Split on `separator` outside of `<>`, `()`, `[]` and `{}` nesting.
fn split_top_level(expression: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in expression.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&expression[start..idx]);
                start = idx + ch.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&expression[start..]);
    parts
}

fn is_balanced(expression: &str) -> bool {
    let mut stack = Vec::new();
    for ch in expression.chars() {
        match ch {
            '<' | '(' | '[' | '{' => stack.push(ch),
            '>' | ')' | ']' | '}' => {
                let expected = match ch {
                    '>' => '<',
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(expected) {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}
