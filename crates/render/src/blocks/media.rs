use crate::document::Node;
use crate::escape::html_escape;
use crate::registry::NodeRenderer;
use crate::renderer::RenderContext;

/// `image`: a figure with an optional caption from `attrs.title`.
///
/// With `attrs.lightbox` the image is wrapped in a link to the full-size
/// source carrying the attributes the client-side lightbox looks for.
#[derive(Debug, Clone, Copy, Default)]
pub struct Image;

impl NodeRenderer for Image {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        let attrs = node.attrs();
        let src = ctx.url_attr(attrs.str_or("src", ""), "");
        let alt = html_escape(attrs.str_or("alt", ""));
        let title = html_escape(attrs.str_or("title", ""));
        let lightbox = attrs.bool_or("lightbox", false);

        let caption = if title.is_empty() {
            String::new()
        } else {
            format!("<figcaption>{title}</figcaption>")
        };

        if lightbox {
            format!(
                "<figure><a href=\"{src}\" data-pswp-width=\"auto\" data-pswp-height=\"auto\" \
                 class=\"lightbox-trigger block cursor-zoom-in\">\
                 <img src=\"{src}\" alt=\"{alt}\" title=\"{title}\" class=\"hover:opacity-90 transition-opacity\">\
                 </a>{caption}</figure>"
            )
        } else {
            format!("<figure><img src=\"{src}\" alt=\"{alt}\" title=\"{title}\">{caption}</figure>")
        }
    }
}

/// `youtube`: a responsive iframe around an already embeddable URL.
///
/// A missing source still renders the wrapper with an empty `src`; a source
/// the URL policy rejects renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoEmbed;

impl NodeRenderer for VideoEmbed {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        let raw = node.attrs().str_or("src", "");
        let Some(src) = ctx.safe_url(raw) else {
            return String::new();
        };

        format!(
            "<div class=\"aspect-video w-full my-4 rounded-lg overflow-hidden\">\
             <iframe src=\"{}\" class=\"w-full h-full\" frameborder=\"0\" allowfullscreen></iframe>\
             </div>",
            html_escape(src)
        )
    }
}
