//! Document renderer: the entry point that parses a stored document and
//! dispatches each node to its registered renderer.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::document::{DOC_TYPE, Document, Node};
use crate::error::{RenderError, RenderResult};
use crate::escape::html_escape;
use crate::ids::{IdGenerator, UniqueIds};
use crate::marks::apply_marks;
use crate::registry::RendererRegistry;

/// Compiles stored documents into HTML.
///
/// A renderer is built once and shared; it is `Send + Sync` and keeps no
/// per-call state, so concurrent calls need no locking.
pub struct DocumentRenderer {
    registry: RendererRegistry,
    config: RenderConfig,
    ids: Arc<dyn IdGenerator>,
}

impl DocumentRenderer {
    /// Create a renderer that issues globally unique element ids.
    pub fn new(registry: RendererRegistry, config: RenderConfig) -> Self {
        Self {
            registry,
            config,
            ids: Arc::new(UniqueIds),
        }
    }

    /// Replace the element id source, e.g. with [`OrdinalIds`](crate::OrdinalIds)
    /// for reproducible output.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Decode a stored document and check its root type.
    pub fn parse(raw: &str) -> RenderResult<Document> {
        let document: Document = serde_json::from_str(raw)?;
        if document.doc_type != DOC_TYPE {
            return Err(RenderError::NotADocument {
                found: document.doc_type,
            });
        }
        Ok(document)
    }

    /// Render a stored document to HTML.
    ///
    /// Never fails: input that is not a valid document renders as an empty
    /// string.
    pub fn render(&self, raw: &str) -> String {
        match Self::parse(raw) {
            Ok(document) => self.render_document(&document),
            Err(e) => {
                debug!(error = %e, "stored document not rendered");
                String::new()
            }
        }
    }

    /// Render an already decoded document.
    pub fn render_document(&self, document: &Document) -> String {
        if document.doc_type != DOC_TYPE {
            return String::new();
        }
        let mut ctx = RenderContext::new(&self.registry, &self.config, self.ids.as_ref());
        ctx.render_nodes(document.nodes())
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(
            RendererRegistry::with_standard_renderers(),
            RenderConfig::default(),
        )
    }
}

impl fmt::Debug for DocumentRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentRenderer")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Per-call rendering state handed to every node renderer.
///
/// Renderers call back into the context to render their children, so the
/// depth limit, URL policy and id sequence are shared by the whole call.
pub struct RenderContext<'a> {
    registry: &'a RendererRegistry,
    config: &'a RenderConfig,
    ids: &'a dyn IdGenerator,
    depth: usize,
    issued_ids: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        registry: &'a RendererRegistry,
        config: &'a RenderConfig,
        ids: &'a dyn IdGenerator,
    ) -> Self {
        Self {
            registry,
            config,
            ids,
            depth: 0,
            issued_ids: 0,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Nesting depth of the node currently being rendered.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Render a sequence of nodes in order and concatenate the results.
    pub fn render_nodes(&mut self, nodes: &[Node]) -> String {
        let mut html = String::new();
        for node in nodes {
            html.push_str(&self.render_node(node));
        }
        html
    }

    /// Render a node's children, or nothing for atomic nodes.
    pub fn render_children(&mut self, node: &Node) -> String {
        self.render_nodes(node.children())
    }

    /// Render a single node.
    ///
    /// Text is escaped before marks are applied. Unknown node types render
    /// their children. Nodes nested deeper than the configured limit render
    /// nothing.
    pub fn render_node(&mut self, node: &Node) -> String {
        if node.is_text() {
            return self.render_text(node);
        }

        if self.depth >= self.config.max_depth {
            warn!(
                node_type = %node.node_type,
                depth = self.depth,
                "node nesting exceeds max depth; subtree skipped"
            );
            return String::new();
        }

        let registry = self.registry;
        self.depth += 1;
        let html = match registry.get(&node.node_type) {
            Some(renderer) => renderer.render(node, self),
            None => self.render_children(node),
        };
        self.depth -= 1;
        html
    }

    fn render_text(&self, node: &Node) -> String {
        let escaped = html_escape(node.text.as_deref().unwrap_or(""));
        apply_marks(escaped, node.marks(), self.config.url_policy)
    }

    /// Issue the next element id for this render call.
    pub fn next_id(&mut self, prefix: &str) -> String {
        let id = self.ids.generate(prefix, self.issued_ids);
        self.issued_ids += 1;
        id
    }

    /// The trimmed URL if the configured policy accepts it.
    pub fn safe_url<'u>(&self, raw: &'u str) -> Option<&'u str> {
        self.config.url_policy.accept(raw)
    }

    /// An attribute-escaped URL, or `fallback` when the policy rejects it.
    pub fn url_attr(&self, raw: &str, fallback: &str) -> String {
        html_escape(self.safe_url(raw).unwrap_or(fallback))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ids::OrdinalIds;
    use serde_json::{Value, json};

    fn render(value: Value) -> String {
        DocumentRenderer::default().render(&value.to_string())
    }

    fn doc(content: Value) -> Value {
        json!({ "type": "doc", "content": content })
    }

    #[test]
    fn renders_paragraph() {
        let html = render(doc(json!([
            { "type": "paragraph", "content": [{ "type": "text", "text": "Hello World" }] }
        ])));
        assert_eq!(html, "<p>Hello World</p>");
    }

    #[test]
    fn malformed_json_renders_empty() {
        let renderer = DocumentRenderer::default();
        for raw in ["", "invalid json", "{", "[]", "null", "42", "{\"content\":[]}"] {
            assert_eq!(renderer.render(raw), "", "input {raw:?}");
        }
    }

    #[test]
    fn non_doc_root_renders_empty() {
        assert_eq!(render(json!({ "type": "not-doc", "content": [] })), "");
        assert_eq!(
            render(json!({
                "type": "paragraph",
                "content": [{ "type": "text", "text": "x" }]
            })),
            ""
        );
    }

    #[test]
    fn parse_reports_wrong_root() {
        let err = DocumentRenderer::parse(r#"{"type":"page"}"#).unwrap_err();
        assert!(matches!(err, RenderError::NotADocument { ref found } if found == "page"));
        let err = DocumentRenderer::parse("nope").unwrap_err();
        assert!(matches!(err, RenderError::Parse(_)));
    }

    #[test]
    fn document_without_content_is_empty() {
        assert_eq!(render(json!({ "type": "doc" })), "");
        assert_eq!(render(doc(json!([]))), "");
    }

    #[test]
    fn structurally_invalid_payload_renders_empty() {
        // `content` must be an array of nodes.
        assert_eq!(render(json!({ "type": "doc", "content": "text" })), "");
        assert_eq!(render(doc(json!([{ "text": "no type" }]))), "");
    }

    #[test]
    fn malformed_node_does_not_blank_siblings() {
        let html = render(doc(json!([
            { "type": "paragraph", "content": [{ "type": "text", "text": "Intro" }] },
            { "type": "heading", "attrs": [], "content": [{ "type": "text", "text": "Title" }] },
            { "type": "paragraph", "content": [{ "type": "text", "text": 5 }] },
            { "type": "paragraph", "content": [{ "type": "text", "text": "x", "marks": [{}] }] },
            { "content": [] },
            { "type": "paragraph", "content": [{ "type": "text", "text": "Outro" }] }
        ])));
        assert_eq!(html, "<p>Intro</p><h1>Title</h1><p>5</p><p>x</p><p>Outro</p>");
    }

    #[test]
    fn text_is_escaped_before_marks() {
        let html = render(doc(json!([{
            "type": "paragraph",
            "content": [{
                "type": "text",
                "text": "<b>\"x\" & y</b>",
                "marks": [{ "type": "bold" }]
            }]
        }])));
        assert_eq!(
            html,
            "<p><strong>&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;</strong></p>"
        );
    }

    #[test]
    fn text_node_children_are_ignored() {
        let html = render(doc(json!([{
            "type": "text",
            "text": "top",
            "content": [{ "type": "text", "text": "hidden" }]
        }])));
        assert_eq!(html, "top");
    }

    #[test]
    fn unknown_node_passes_children_through() {
        let html = render(doc(json!([{
            "type": "unknownBlock",
            "content": [{ "type": "text", "text": "Some content" }]
        }])));
        assert_eq!(html, "Some content");
    }

    #[test]
    fn unknown_atomic_node_renders_empty() {
        assert_eq!(render(doc(json!([{ "type": "fullCalendar", "attrs": { "x": 1 } }]))), "");
    }

    #[test]
    fn nodes_beyond_max_depth_are_skipped() {
        let renderer = DocumentRenderer::new(
            RendererRegistry::with_standard_renderers(),
            RenderConfig::default().with_max_depth(2),
        );
        let nested = doc(json!([
            { "type": "paragraph", "content": [{ "type": "text", "text": "a" }] },
            {
                "type": "grid",
                "content": [{
                    "type": "column",
                    "content": [{ "type": "paragraph", "content": [{ "type": "text", "text": "deep" }] }]
                }]
            }
        ]));
        let html = renderer.render(&nested.to_string());
        assert!(html.starts_with("<p>a</p>"));
        assert!(html.contains("grid-column"));
        assert!(!html.contains("deep"));
    }

    #[test]
    fn deeply_nested_hostile_input_does_not_overflow() {
        let mut raw = String::new();
        for _ in 0..10_000 {
            raw.push_str(r#"{"type":"x","content":["#);
        }
        let html = DocumentRenderer::default().render(&format!(r#"{{"type":"doc","content":[{raw}"#));
        assert_eq!(html, "");
    }

    #[test]
    fn context_issues_sequential_ids() {
        let registry = RendererRegistry::new();
        let config = RenderConfig::default();
        let mut ctx = RenderContext::new(&registry, &config, &OrdinalIds);
        assert_eq!(ctx.next_id("gallery"), "gallery-0");
        assert_eq!(ctx.next_id("gallery"), "gallery-1");
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn renderer_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DocumentRenderer>();
    }
}
