//! Node renderer trait and the registry mapping node types to renderers.
//!
//! The registry is built once during startup and then handed to a
//! [`DocumentRenderer`](crate::DocumentRenderer), which only reads from it.
//! Hosts customise rendering by registering their own renderer for a new or
//! existing node type before that hand-off.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::blocks::{
    CallToAction, Container, FormBlock, Gallery, Heading, HorizontalRule, Image, VideoEmbed,
};
use crate::document::Node;
use crate::forms::{CsrfTokenSource, FormRepository};
use crate::renderer::RenderContext;

/// Renders one node type to an HTML fragment.
///
/// Implementations recurse into children through `ctx` rather than walking
/// the tree themselves, so depth limits and URL policy apply uniformly.
/// Functions and closures with the same signature implement it too.
pub trait NodeRenderer: Send + Sync {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String;
}

impl<F> NodeRenderer for F
where
    F: Fn(&Node, &mut RenderContext<'_>) -> String + Send + Sync,
{
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        self(node, ctx)
    }
}

/// Registry of node renderers, keyed by node type.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    renderers: HashMap<String, Arc<dyn NodeRenderer>>,
}

impl RendererRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in renderer except `formBlock`,
    /// which needs collaborators (see [`with_forms`](Self::with_forms)).
    pub fn with_standard_renderers() -> Self {
        let mut registry = Self::new();
        registry.register_standard_renderers();
        registry
    }

    /// Register a renderer for `node_type`, replacing any earlier one.
    pub fn register(&mut self, node_type: impl Into<String>, renderer: impl NodeRenderer + 'static) {
        self.register_shared(node_type, Arc::new(renderer));
    }

    /// Register a closure as the renderer for `node_type`.
    pub fn register_fn<F>(&mut self, node_type: impl Into<String>, renderer: F)
    where
        F: Fn(&Node, &mut RenderContext<'_>) -> String + Send + Sync + 'static,
    {
        self.register(node_type, renderer);
    }

    /// Register an already shared renderer, e.g. one instance under
    /// several node types.
    pub fn register_shared(&mut self, node_type: impl Into<String>, renderer: Arc<dyn NodeRenderer>) {
        self.renderers.insert(node_type.into(), renderer);
    }

    /// Add the `formBlock` renderer backed by the given collaborators.
    pub fn with_forms(
        mut self,
        forms: Arc<dyn FormRepository>,
        csrf: Arc<dyn CsrfTokenSource>,
    ) -> Self {
        self.register("formBlock", FormBlock::new(forms, csrf));
        self
    }

    /// Look up the renderer for a node type.
    pub fn get(&self, node_type: &str) -> Option<&Arc<dyn NodeRenderer>> {
        self.renderers.get(node_type)
    }

    /// Check whether a node type has a renderer.
    pub fn contains(&self, node_type: &str) -> bool {
        self.renderers.contains_key(node_type)
    }

    /// Return the number of registered node types.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Registered node types, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Register the built-in renderers.
    pub fn register_standard_renderers(&mut self) {
        self.register("heading", Heading);
        self.register("paragraph", Container::paragraph());

        let list: Arc<dyn NodeRenderer> = Arc::new(Container::bullet_list());
        self.register_shared("bulletList", Arc::clone(&list));
        // Older editor builds stored bullet lists under this name.
        self.register_shared("inputlist", list);
        self.register("listItem", Container::list_item());

        self.register("image", Image);
        self.register("grid", Container::grid());
        self.register("column", Container::column());

        self.register("table", Container::table());
        self.register("tableRow", Container::table_row());
        self.register("tableHeader", Container::table_header());
        self.register("tableCell", Container::table_cell());

        self.register("youtube", VideoEmbed);
        self.register("horizontalRule", HorizontalRule);
        self.register("cta", CallToAction);
        self.register("gallery", Gallery);
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
