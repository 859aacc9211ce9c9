use crate::document::Node;
use crate::registry::NodeRenderer;
use crate::renderer::RenderContext;

/// Renders a node's children between a fixed opening and closing fragment.
///
/// Covers every purely structural block: paragraphs, lists, the grid
/// layout and the table family.
#[derive(Debug, Clone, Copy)]
pub struct Container {
    open: &'static str,
    close: &'static str,
}

impl Container {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }

    pub const fn paragraph() -> Self {
        Self::new("<p>", "</p>")
    }

    pub const fn bullet_list() -> Self {
        Self::new("<ul>", "</ul>")
    }

    pub const fn list_item() -> Self {
        Self::new("<li>", "</li>")
    }

    /// Flex row holding `column` children.
    pub const fn grid() -> Self {
        Self::new("<div class=\"grid-layout flex gap-4 my-4\">", "</div>")
    }

    pub const fn column() -> Self {
        Self::new("<div class=\"grid-column flex-1 min-w-0\">", "</div>")
    }

    pub const fn table() -> Self {
        Self::new(
            "<div class=\"overflow-x-auto my-4\"><table class=\"w-full text-left border-collapse\"><tbody>",
            "</tbody></table></div>",
        )
    }

    pub const fn table_row() -> Self {
        Self::new("<tr class=\"border-b border-gray-200\">", "</tr>")
    }

    pub const fn table_header() -> Self {
        Self::new("<th class=\"p-2 bg-gray-50 font-bold border border-gray-200\">", "</th>")
    }

    pub const fn table_cell() -> Self {
        Self::new("<td class=\"p-2 border border-gray-200\">", "</td>")
    }
}

impl NodeRenderer for Container {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        let content = ctx.render_children(node);
        format!("{}{content}{}", self.open, self.close)
    }
}
