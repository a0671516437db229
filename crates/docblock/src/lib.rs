#![deny(clippy::all)]

//! Extraction and interpretation of JSDoc-style docblock comments.
//!
//! This crate provides:
//! - A segmenter that splits one `/** ... */` comment into raw tag entries.
//! - A registry of tag interpreters turning raw entries into typed values.
//! - A block assembler folding interpreted tags into a flat record with `raw` and `id`.
//! - A document parser that extracts, filters and sorts every docblock of a source text.
//!
//! ```no_run
//! # async fn run() -> docblock::Result<()> {
//! use docblock::{Docblock, DocblockOptions};
//!
//! let mut doc = Docblock::from_path("src/button.ts", DocblockOptions::new())?;
//! for block in doc.parse().await? {
//!     println!("{:?}", block.to_object()?.get("name"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod context;
pub mod diagnostics;
pub mod document;
pub mod entry;
pub mod error;
pub mod filter;
pub mod interface;
pub mod literal;
#[cfg(not(target_family = "wasm"))]
pub mod namespaces;
pub mod package;
pub mod registry;
pub mod render;
pub mod renderer;
pub mod segmenter;
pub mod settings;
pub mod sort;
pub mod strings;
pub mod tags;
pub mod types;
pub mod value;

pub use block::{DocblockBlock, assemble, block_id};
pub use context::{Collaborators, ParseContext};
pub use diagnostics::{CollectingDiagnostics, DiagnosticsSink, TagFailure, TracingDiagnostics};
pub use document::{Docblock, extract_comments};
pub use entry::{InlineValue, RawTagEntry, TagEntries};
pub use error::{DocblockError, Result};
pub use filter::{TagFilter, TagMatcher};
pub use interface::{InterfaceDefinition, InterfaceLoader, JsonInterfaceLoader};
pub use literal::{JsonLiteralParser, LiteralParser};
#[cfg(not(target_family = "wasm"))]
pub use namespaces::first_docblocks_with_namespace_in_folder;
pub use package::PackageMetadata;
pub use registry::{TagInterpreter, TagRegistry};
#[cfg(feature = "markdown")]
pub use renderer::HtmlRenderer;
pub use renderer::{MarkdownOptions, MarkdownRenderer, PlainTextRenderer, default_renderer};
pub use segmenter::{normalize, segment, segment_source};
pub use settings::{BlockPredicate, DocblockOptions, DocblockSettings};
pub use sort::Comparator;
pub use types::{BasicTypeResolver, TypeDescriptor, TypeRef, TypeResolver};
pub use value::{Record, RenderableText, Value};
