//! Cerne test utilities.
//!
//! Helpers for integration testing: document builders, form fixtures and
//! collaborator doubles for the form block renderer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Map, Value as JsonValue, json};

use cerne_render::{
    CsrfTokenSource, DocumentRenderer, FormDefinition, FormRepository, OrdinalIds, RenderConfig,
    RendererRegistry, StaticCsrfToken, StaticFormRepository,
};

/// CSRF token used by [`renderer_with_forms`].
pub const TEST_CSRF_TOKEN: &str = "test-csrf-token";

/// Start building a node of the given type.
pub fn node(node_type: &str) -> TestNode {
    TestNode {
        node_type: node_type.to_string(),
        text: None,
        attrs: Map::new(),
        marks: Vec::new(),
        content: None,
    }
}

/// A text leaf.
pub fn text(text: &str) -> TestNode {
    let mut node = node("text");
    node.text = Some(text.to_string());
    node
}

/// A paragraph holding a single text leaf.
pub fn paragraph(content: &str) -> TestNode {
    node("paragraph").child(text(content))
}

/// Serialize a `doc` root around `nodes` to the stored JSON form.
pub fn doc(nodes: impl IntoIterator<Item = TestNode>) -> String {
    json!({
        "type": "doc",
        "content": nodes.into_iter().map(TestNode::into_value).collect::<Vec<_>>(),
    })
    .to_string()
}

/// A node builder for creating test documents.
#[derive(Debug, Clone)]
pub struct TestNode {
    node_type: String,
    text: Option<String>,
    attrs: Map<String, JsonValue>,
    marks: Vec<JsonValue>,
    content: Option<Vec<TestNode>>,
}

impl TestNode {
    /// Set an attribute.
    pub fn attr(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    /// Append a child node.
    pub fn child(mut self, child: TestNode) -> Self {
        self.content.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Append several child nodes.
    pub fn children(mut self, children: impl IntoIterator<Item = TestNode>) -> Self {
        self.content.get_or_insert_with(Vec::new).extend(children);
        self
    }

    /// Add a mark without attributes (`bold`, `italic`, ...).
    pub fn mark(mut self, mark_type: &str) -> Self {
        self.marks.push(json!({ "type": mark_type }));
        self
    }

    /// Add a link mark.
    pub fn link(mut self, href: &str) -> Self {
        self.marks
            .push(json!({ "type": "link", "attrs": { "href": href } }));
        self
    }

    pub fn into_value(self) -> JsonValue {
        let mut value = Map::new();
        value.insert("type".to_string(), JsonValue::String(self.node_type));
        if let Some(text) = self.text {
            value.insert("text".to_string(), JsonValue::String(text));
        }
        if !self.attrs.is_empty() {
            value.insert("attrs".to_string(), JsonValue::Object(self.attrs));
        }
        if !self.marks.is_empty() {
            value.insert("marks".to_string(), JsonValue::Array(self.marks));
        }
        if let Some(content) = self.content {
            value.insert(
                "content".to_string(),
                JsonValue::Array(content.into_iter().map(TestNode::into_value).collect()),
            );
        }
        JsonValue::Object(value)
    }
}

/// An active contact form with one field of every control type.
pub fn contact_form() -> FormDefinition {
    form_fixture("active")
}

/// The contact form, switched off.
pub fn inactive_form() -> FormDefinition {
    form_fixture("inactive")
}

fn form_fixture(status: &str) -> FormDefinition {
    let value = json!({
        "slug": "contact",
        "status": status,
        "fields": [
            { "name": "name", "label": "Your name", "type": "text", "required": true, "placeholder": "Jane Doe" },
            { "name": "email", "label": "Email", "type": "email", "required": true },
            { "name": "message", "label": "Message", "type": "textarea", "placeholder": "How can we help?" },
            { "name": "topic", "label": "Topic", "type": "select", "options": ["Sales", "Support"] },
            { "name": "newsletter", "label": "Subscribe", "type": "checkbox" }
        ],
        "settings": { "submitLabel": "Send message" }
    });
    match serde_json::from_value(value) {
        Ok(form) => form,
        Err(e) => panic!("form fixture must decode: {e}"),
    }
}

/// Repository holding [`contact_form`] as `"1"` and [`inactive_form`] as `"2"`.
pub fn form_repository() -> StaticFormRepository {
    StaticFormRepository::new()
        .with_form("1", contact_form())
        .with_form("2", inactive_form())
}

/// A renderer with deterministic ids and a form block backed by `forms`.
pub fn renderer_with_forms(forms: impl FormRepository + 'static) -> DocumentRenderer {
    renderer_with_collaborators(
        Arc::new(forms),
        Arc::new(StaticCsrfToken(TEST_CSRF_TOKEN.to_string())),
    )
}

/// A renderer with deterministic ids and the given form collaborators.
pub fn renderer_with_collaborators(
    forms: Arc<dyn FormRepository>,
    csrf: Arc<dyn CsrfTokenSource>,
) -> DocumentRenderer {
    let registry = RendererRegistry::with_standard_renderers().with_forms(forms, csrf);
    DocumentRenderer::new(registry, RenderConfig::default()).with_id_generator(OrdinalIds)
}

/// A form repository whose storage is unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingFormRepository;

impl FormRepository for FailingFormRepository {
    fn find_form(&self, id: &str) -> anyhow::Result<Option<FormDefinition>> {
        anyhow::bail!("form storage unavailable while loading form {id}")
    }
}

/// A CSRF token source that numbers the tokens it issues.
#[derive(Debug, Default)]
pub struct CountingCsrf {
    issued: AtomicUsize,
}

impl CountingCsrf {
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

impl CsrfTokenSource for CountingCsrf {
    fn current_token(&self) -> anyhow::Result<String> {
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        Ok(format!("token-{n}"))
    }
}
