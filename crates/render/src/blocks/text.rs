use crate::document::Node;
use crate::registry::NodeRenderer;
use crate::renderer::RenderContext;

/// `heading`: `<h1>`–`<h6>` chosen by `attrs.level`.
///
/// The level defaults to 1 and is clamped into the valid range so stored
/// content with a bad level still produces a real heading tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct Heading;

impl NodeRenderer for Heading {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        let level = node.attrs().int("level").unwrap_or(1).clamp(1, 6);
        let content = ctx.render_children(node);
        format!("<h{level}>{content}</h{level}>")
    }
}

/// `horizontalRule`: a fixed divider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizontalRule;

impl NodeRenderer for HorizontalRule {
    fn render(&self, _node: &Node, _ctx: &mut RenderContext<'_>) -> String {
        "<hr class=\"my-8 border-gray-200\">".to_string()
    }
}
