//! End-to-end rendering of stored documents.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use cerne_render::{
    DocumentRenderer, Node, NodeRenderer, OrdinalIds, RenderConfig, RenderContext,
    RendererRegistry, UrlPolicy, render_document,
};
use cerne_test_utils::{doc, node, paragraph, text};
use pretty_assertions::assert_eq;

fn deterministic() -> DocumentRenderer {
    DocumentRenderer::default().with_id_generator(OrdinalIds)
}

#[test]
fn hello_world_paragraph() {
    let html = render_document(
        r#"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"Hello World"}]}]}"#,
    );
    assert_eq!(html, "<p>Hello World</p>");
}

#[test]
fn bold_text_in_paragraph() {
    let html = render_document(&doc([node("paragraph").child(text("Bold text").mark("bold"))]));
    assert!(html.contains("<strong>Bold text</strong>"));
}

#[test]
fn image_without_lightbox_is_plain() {
    let image = node("image")
        .attr("src", "/u/a.jpg")
        .attr("alt", "x")
        .attr("title", "t")
        .attr("lightbox", false);
    let html = render_document(&doc([image]));
    assert_eq!(
        html,
        "<figure><img src=\"/u/a.jpg\" alt=\"x\" title=\"t\"><figcaption>t</figcaption></figure>"
    );
    assert!(!html.contains("<a "));
    assert!(!html.contains("lightbox-trigger"));
}

#[test]
fn image_with_lightbox_is_wrapped_in_trigger() {
    let image = node("image")
        .attr("src", "/u/a.jpg")
        .attr("alt", "x")
        .attr("title", "t")
        .attr("lightbox", true);
    let html = render_document(&doc([image]));
    assert!(html.contains("<a href=\"/u/a.jpg\""));
    assert!(html.contains("lightbox-trigger"));
    assert!(html.contains("<figcaption>t</figcaption>"));
}

#[test]
fn unknown_block_keeps_its_text() {
    let html = render_document(
        r#"{"type":"doc","content":[{"type":"unknownBlock","content":[{"type":"text","text":"Some content"}]}]}"#,
    );
    assert!(html.contains("Some content"));
}

#[test]
fn horizontal_rule_ignores_attrs() {
    let plain = render_document(&doc([node("horizontalRule")]));
    let with_attrs = render_document(&doc([node("horizontalRule").attr("class", "x")]));
    assert_eq!(plain, "<hr class=\"my-8 border-gray-200\">");
    assert_eq!(plain, with_attrs);
}

#[test]
fn future_node_type_wrapping_paragraph_passes_through() {
    let html = render_document(&doc([
        node("sectionBreakV2").child(paragraph("Inside")),
        paragraph("After"),
    ]));
    assert_eq!(html, "<p>Inside</p><p>After</p>");
}

#[test]
fn special_characters_never_appear_raw() {
    let hostile = "<script>alert(\"x\") & 'y'</script>";
    let marked = [
        text(hostile),
        text(hostile).mark("bold"),
        text(hostile).mark("italic").mark("strike"),
        text(hostile).link("https://example.com/?a=1&b=2"),
    ];
    let html = render_document(&doc([node("paragraph").children(marked)]));

    assert!(!html.contains("<script>"));
    assert!(!html.contains("\"x\""));
    assert_eq!(html.matches("&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;").count(), 4);
    assert!(html.contains("href=\"https://example.com/?a=1&amp;b=2\""));
}

#[test]
fn stored_mark_order_nests_last_innermost() {
    let html = render_document(&doc([
        node("paragraph").child(text("x").mark("bold").mark("italic")),
    ]));
    assert_eq!(html, "<p><strong><em>x</em></strong></p>");

    let reversed = render_document(&doc([
        node("paragraph").child(text("x").mark("italic").mark("bold")),
    ]));
    assert_eq!(reversed, "<p><em><strong>x</strong></em></p>");
}

#[test]
fn link_mark_rejects_script_urls() {
    let html = render_document(&doc([
        node("paragraph").child(text("click").link("javascript:alert(1)")),
    ]));
    assert_eq!(html, "<p><a href=\"#\">click</a></p>");
}

#[test]
fn permissive_policy_keeps_stored_urls() {
    let renderer = DocumentRenderer::new(
        RendererRegistry::with_standard_renderers(),
        RenderConfig::default().with_url_policy(UrlPolicy::Permissive),
    );
    let html = renderer.render(&doc([
        node("paragraph").child(text("click").link("javascript:alert(1)")),
    ]));
    assert_eq!(html, "<p><a href=\"javascript:alert(1)\">click</a></p>");
}

#[test]
fn nested_page_layout() {
    let page = doc([
        node("heading").attr("level", 2).child(text("Pricing")),
        node("grid").children([
            node("column").child(paragraph("Left")),
            node("column").child(node("bulletList").children([
                node("listItem").child(paragraph("One")),
                node("listItem").child(paragraph("Two")),
            ])),
        ]),
        node("table").child(node("tableRow").children([
            node("tableHeader").child(paragraph("Plan")),
            node("tableCell").child(paragraph("Pro")),
        ])),
    ]);
    let html = render_document(&page);

    assert!(html.starts_with("<h2>Pricing</h2><div class=\"grid-layout flex gap-4 my-4\">"));
    assert!(html.contains(
        "<div class=\"grid-column flex-1 min-w-0\"><ul><li><p>One</p></li><li><p>Two</p></li></ul></div>"
    ));
    assert!(html.contains("<th class=\"p-2 bg-gray-50 font-bold border border-gray-200\"><p>Plan</p></th>"));
    assert!(html.ends_with("</tr></tbody></table></div>"));
}

#[test]
fn legacy_list_name_renders_as_bullet_list() {
    let current = render_document(&doc([node("bulletList").child(node("listItem").child(paragraph("a")))]));
    let legacy = render_document(&doc([node("inputlist").child(node("listItem").child(paragraph("a")))]));
    assert_eq!(current, "<ul><li><p>a</p></li></ul>");
    assert_eq!(legacy, current);
}

#[test]
fn rendering_is_idempotent_with_ordinal_ids() {
    let slideshow = node("gallery")
        .attr("layout", "slideshow")
        .attr(
            "images",
            serde_json::json!([{ "src": "/1.jpg" }, { "src": "/2.jpg" }]),
        );
    let raw = doc([paragraph("Intro"), slideshow.clone(), slideshow]);

    let renderer = deterministic();
    let first = renderer.render(&raw);
    let second = renderer.render(&raw);
    assert_eq!(first, second);
    assert!(first.contains("id=\"gallery-0\""));
    assert!(first.contains("id=\"gallery-1\""));
}

#[test]
fn default_ids_are_unique_per_call() {
    let raw = doc([node("gallery")
        .attr("layout", "slideshow")
        .attr("images", serde_json::json!([{ "src": "/1.jpg" }]))]);
    let renderer = DocumentRenderer::default();
    assert_ne!(renderer.render(&raw), renderer.render(&raw));
}

struct Callout;

impl NodeRenderer for Callout {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        let tone = node.attrs().str_or("tone", "info").to_string();
        let content = ctx.render_children(node);
        format!("<aside class=\"callout-{tone}\">{content}</aside>")
    }
}

struct Shout;

impl NodeRenderer for Shout {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        format!("<p class=\"shout\">{}</p>", ctx.render_children(node))
    }
}

#[test]
fn host_renderers_extend_and_override() {
    let mut registry = RendererRegistry::with_standard_renderers();
    registry.register("callout", Callout);
    registry.register("paragraph", Shout);
    let renderer = DocumentRenderer::new(registry, RenderConfig::default());

    let html = renderer.render(&doc([
        node("callout").attr("tone", "warn").child(paragraph("Careful")),
    ]));
    assert_eq!(html, "<aside class=\"callout-warn\"><p class=\"shout\">Careful</p></aside>");
}

#[test]
fn depth_limit_applies_to_host_renderers() {
    let mut registry = RendererRegistry::with_standard_renderers();
    registry.register("callout", Callout);
    let renderer = DocumentRenderer::new(registry, RenderConfig::default().with_max_depth(3));

    let mut tree = paragraph("deep");
    for _ in 0..5 {
        tree = node("callout").child(tree);
    }
    let html = renderer.render(&doc([tree]));
    assert_eq!(
        html,
        "<aside class=\"callout-info\"><aside class=\"callout-info\"><aside class=\"callout-info\"></aside></aside></aside>"
    );
}

#[test]
fn concurrent_renders_share_one_renderer() {
    let renderer = deterministic();
    let raw = doc([
        node("heading").attr("level", 1).child(text("Title")),
        node("gallery")
            .attr("layout", "slideshow")
            .attr("images", serde_json::json!([{ "src": "/1.jpg" }, { "src": "/2.jpg" }])),
        paragraph("Body"),
    ]);
    let expected = renderer.render(&raw);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| (0..50).map(|_| renderer.render(&raw)).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            for html in handle.join().unwrap() {
                assert_eq!(html, expected);
            }
        }
    });
}

#[test]
fn bad_block_attrs_leave_neighbours_rendered() {
    let raw = format!(
        r#"{{"type":"doc","content":[{},{{"type":"image","attrs":[]}},{}]}}"#,
        paragraph("Intro").into_value(),
        paragraph("Outro").into_value(),
    );
    assert_eq!(
        render_document(&raw),
        "<p>Intro</p><figure><img src=\"\" alt=\"\" title=\"\"></figure><p>Outro</p>"
    );
}

#[test]
fn invalid_documents_render_empty() {
    for raw in ["", "not json", "[]", r#"{"type":"page","content":[]}"#, r#"{"type":"doc","content":{}}"#] {
        assert_eq!(render_document(raw), "", "input {raw:?}");
    }
}
