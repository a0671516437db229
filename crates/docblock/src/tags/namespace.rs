use crate::context::ParseContext;
use crate::entry::RawTagEntry;
use crate::strings::{hyphenate_whitespace, namespace_compliant};
use crate::tags::inline_text;
use crate::value::Value;

/// `@namespace <path>`, prefixed with the package name when one is known.
pub fn namespace(entries: &[RawTagEntry], ctx: &ParseContext) -> anyhow::Result<Option<Value>> {
    let Some(entry) = entries.first() else {
        return Ok(None);
    };
    let Some(text) = inline_text(entry) else {
        return Ok(Some(Value::Bool(true)));
    };

    let namespace = hyphenate_whitespace(text);
    let package_name = ctx
        .package
        .as_ref()
        .and_then(|package| package.name.as_deref())
        .filter(|name| !name.is_empty());

    let token = match package_name {
        Some(name) => namespace_compliant(&format!("{}.{namespace}", name.replacen('/', ".", 1))),
        None => namespace_compliant(&namespace),
    };
    Ok(Some(Value::from(token)))
}
