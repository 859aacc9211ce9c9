//! Cerne structured-document renderer.
//!
//! Compiles the JSON document tree produced by the page editor into HTML
//! for public display. Rendering is a total function: malformed input,
//! unknown node types and missing collaborators all degrade to "nothing
//! rendered" for the smallest affected piece instead of an error.
//!
//! ```
//! let html = cerne_render::render_document(
//!     r#"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"Hello World"}]}]}"#,
//! );
//! assert_eq!(html, "<p>Hello World</p>");
//! ```

pub mod blocks;
pub mod config;
pub mod document;
pub mod error;
pub mod escape;
pub mod forms;
pub mod ids;
pub mod marks;
pub mod registry;
pub mod renderer;

use std::sync::LazyLock;

pub use config::{RenderConfig, UrlPolicy};
pub use document::{Attrs, Document, Mark, Node};
pub use error::RenderError;
pub use forms::{
    CsrfTokenSource, FieldKind, FieldOptions, FormDefinition, FormField, FormRepository,
    FormSettings, FormStatus, StaticCsrfToken, StaticFormRepository,
};
pub use ids::{IdGenerator, OrdinalIds, UniqueIds};
pub use registry::{NodeRenderer, RendererRegistry};
pub use renderer::{DocumentRenderer, RenderContext};

static DEFAULT_RENDERER: LazyLock<DocumentRenderer> = LazyLock::new(DocumentRenderer::default);

/// Render a stored document with the default renderer.
///
/// Uses the standard registry and default configuration. Form blocks
/// render empty because no form repository is wired in; build a
/// [`DocumentRenderer`] with [`RendererRegistry::with_forms`] for that.
pub fn render_document(json: &str) -> String {
    DEFAULT_RENDERER.render(json)
}
