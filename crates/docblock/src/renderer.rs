//! Markdown rendering seam used by the assembler's markdown pass.

use serde::{Deserialize, Serialize};

/// Options forwarded to the markdown renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkdownOptions {
    /// Enable GitHub flavored markdown (tables, autolinks, strikethrough).
    pub gfm: bool,
}

/// Renders interpreted text to HTML.
pub trait MarkdownRenderer: Send + Sync {
    /// Render multi-line text as block markdown.
    fn render_block(&self, text: &str, options: &MarkdownOptions) -> anyhow::Result<String>;

    /// Render single-line text without the wrapping paragraph.
    fn render_inline(&self, text: &str, options: &MarkdownOptions) -> anyhow::Result<String>;
}

/// Renderer that returns text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl MarkdownRenderer for PlainTextRenderer {
    fn render_block(&self, text: &str, _options: &MarkdownOptions) -> anyhow::Result<String> {
        Ok(text.to_string())
    }

    fn render_inline(&self, text: &str, _options: &MarkdownOptions) -> anyhow::Result<String> {
        Ok(text.to_string())
    }
}

/// CommonMark renderer backed by the `markdown` crate.
#[cfg(feature = "markdown")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

#[cfg(feature = "markdown")]
impl HtmlRenderer {
    fn to_html(text: &str, options: &MarkdownOptions) -> anyhow::Result<String> {
        let compile_options = if options.gfm {
            ::markdown::Options::gfm()
        } else {
            ::markdown::Options::default()
        };
        ::markdown::to_html_with_options(text, &compile_options)
            .map_err(|message| anyhow::anyhow!("markdown rendering failed: {message}"))
    }
}

#[cfg(feature = "markdown")]
impl MarkdownRenderer for HtmlRenderer {
    fn render_block(&self, text: &str, options: &MarkdownOptions) -> anyhow::Result<String> {
        Self::to_html(text, options)
    }

    fn render_inline(&self, text: &str, options: &MarkdownOptions) -> anyhow::Result<String> {
        let html = Self::to_html(text, options)?;
        let html = html.trim();
        let inner = html
            .strip_prefix("<p>")
            .and_then(|rest| rest.strip_suffix("</p>"))
            .unwrap_or(html);
        Ok(inner.to_string())
    }
}

/// The renderer used when none is configured.
pub fn default_renderer() -> std::sync::Arc<dyn MarkdownRenderer> {
    #[cfg(feature = "markdown")]
    {
        std::sync::Arc::new(HtmlRenderer)
    }
    #[cfg(not(feature = "markdown"))]
    {
        std::sync::Arc::new(PlainTextRenderer)
    }
}
