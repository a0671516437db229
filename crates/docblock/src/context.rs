//! Read-only state handed to every tag interpreter.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use bon::Builder;

use crate::diagnostics::{DiagnosticsSink, TracingDiagnostics};
use crate::interface::{InterfaceLoader, JsonInterfaceLoader};
use crate::literal::{JsonLiteralParser, LiteralParser};
use crate::package::PackageMetadata;
use crate::renderer::{MarkdownOptions, MarkdownRenderer, default_renderer};
use crate::settings::DocblockSettings;
use crate::types::{BasicTypeResolver, TypeResolver};

/// External services the interpreters and the assembler call into.
#[derive(Clone, Builder)]
pub struct Collaborators {
    #[builder(default = Arc::new(BasicTypeResolver) as Arc<dyn TypeResolver>)]
    pub types: Arc<dyn TypeResolver>,

    #[builder(default = Arc::new(JsonLiteralParser) as Arc<dyn LiteralParser>)]
    pub literals: Arc<dyn LiteralParser>,

    #[builder(default = default_renderer())]
    pub renderer: Arc<dyn MarkdownRenderer>,

    #[builder(default = Arc::new(JsonInterfaceLoader) as Arc<dyn InterfaceLoader>)]
    pub interfaces: Arc<dyn InterfaceLoader>,

    #[builder(default = Arc::new(TracingDiagnostics) as Arc<dyn DiagnosticsSink>)]
    pub diagnostics: Arc<dyn DiagnosticsSink>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Parse context: `{ filePath, packageMetadata, renderMarkdown, renderMarkdownProps, markdownOptions }`
/// plus the collaborators.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    pub file_path: Option<PathBuf>,
    pub package: Option<PackageMetadata>,
    pub render_markdown: bool,
    /// Dotted paths whose plain string leaves the markdown pass renders.
    pub render_markdown_props: Vec<String>,
    pub markdown: MarkdownOptions,
    pub collaborators: Collaborators,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &DocblockSettings) -> Self {
        Self {
            file_path: settings.file_path.clone(),
            package: None,
            render_markdown: settings.render_markdown,
            render_markdown_props: settings.render_markdown_props.clone(),
            markdown: settings.markdown.clone(),
            collaborators: Collaborators::default(),
        }
    }

    pub fn with_package(mut self, package: Option<PackageMetadata>) -> Self {
        self.package = package;
        self
    }

    pub fn with_collaborators(mut self, collaborators: Collaborators) -> Self {
        self.collaborators = collaborators;
        self
    }

    pub fn types(&self) -> &dyn TypeResolver {
        self.collaborators.types.as_ref()
    }

    pub fn literals(&self) -> &dyn LiteralParser {
        self.collaborators.literals.as_ref()
    }

    pub fn renderer(&self) -> &dyn MarkdownRenderer {
        self.collaborators.renderer.as_ref()
    }

    pub fn interfaces(&self) -> &dyn InterfaceLoader {
        self.collaborators.interfaces.as_ref()
    }

    pub fn diagnostics(&self) -> &dyn DiagnosticsSink {
        self.collaborators.diagnostics.as_ref()
    }
}
