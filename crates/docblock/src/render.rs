//! Markdown pass over interpreted values.

use crate::context::ParseContext;
use crate::value::{RenderableText, Value};

/// Whether `path` equals or descends from one of the dotted `props`.
///
/// A `*` segment in a prop matches any single segment.
pub fn path_matches(path: &[String], props: &[String]) -> bool {
    props.iter().any(|prop| {
        let segments: Vec<&str> = prop.split('.').collect();
        segments.len() <= path.len()
            && segments
                .iter()
                .zip(path)
                .all(|(segment, part)| *segment == "*" || segment == part)
    })
}

fn render_text(text: &RenderableText, ctx: &ParseContext) -> anyhow::Result<Value> {
    let renderer = ctx.renderer();
    let html = if text.inline {
        renderer.render_inline(&text.text, &ctx.markdown)?
    } else {
        renderer.render_block(&text.text, &ctx.markdown)?
    };
    Ok(Value::Text(html))
}

/// Render the string leaves of `value` found at `path`.
///
/// [`RenderableText`] leaves always render. Plain strings render when their
/// path matches `render_markdown_props`. Lists keep their parent's path.
pub fn render_value(value: Value, path: &mut Vec<String>, ctx: &ParseContext) -> anyhow::Result<Value> {
    match value {
        Value::Renderable(text) => render_text(&text, ctx),
        Value::Text(text) if path_matches(path, &ctx.render_markdown_props) => {
            render_text(&RenderableText::new(text), ctx)
        }
        Value::List(items) => items
            .into_iter()
            .map(|item| render_value(item, path, ctx))
            .collect::<anyhow::Result<Vec<_>>>()
            .map(Value::List),
        Value::Record(record) => {
            let mut rendered = crate::value::Record::with_capacity(record.len());
            for (key, item) in record {
                path.push(key.clone());
                let item = render_value(item, path, ctx);
                path.pop();
                rendered.insert(key, item?);
            }
            Ok(Value::Record(rendered))
        }
        other => Ok(other),
    }
}
