use crate::config::UrlPolicy;
use crate::document::Node;
use crate::escape::{html_escape, is_css_url_safe};
use crate::registry::NodeRenderer;
use crate::renderer::RenderContext;

const DEFAULT_TITLE: &str = "Ready to get started?";
const DEFAULT_SUBTITLE: &str = "Join thousands of satisfied customers today.";
const DEFAULT_BUTTON_TEXT: &str = "Get Started";

/// `cta`: a self-contained call-to-action banner.
///
/// Attributes: `layout` (`centered` | `split` | `hero`), `title`,
/// `subtitle`, `buttonText`, `buttonUrl`, `backgroundImage` and `textColor`
/// (`auto` | `light` | `dark`). Children are never rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallToAction;

impl NodeRenderer for CallToAction {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        let attrs = node.attrs();
        let layout = attrs.str_or("layout", "centered");
        let title = html_escape(attrs.str_or("title", DEFAULT_TITLE));
        let subtitle = html_escape(attrs.str_or("subtitle", DEFAULT_SUBTITLE));
        let button_text = html_escape(attrs.str_or("buttonText", DEFAULT_BUTTON_TEXT));
        let button_url = ctx.url_attr(attrs.str_or("buttonUrl", "#"), "#");
        let background = attrs
            .str("backgroundImage")
            .and_then(|url| background_url(ctx, url));
        let text_color = attrs.str_or("textColor", "auto");

        let is_hero = layout == "hero";
        let hero_or_background = is_hero || background.is_some();

        let text_color_class = match text_color {
            "light" => "text-white",
            "dark" => "text-gray-900",
            _ if hero_or_background => "text-white",
            _ => "text-gray-900",
        };

        let layout_classes = match layout {
            "centered" => "items-center text-center",
            "split" => "md:flex-row md:items-center md:justify-between",
            "hero" => "items-center text-center py-20 min-h-[400px]",
            _ => "",
        };

        let bg_classes = match (&background, is_hero) {
            (None, false) => "bg-gray-50",
            (None, true) => "bg-gradient-to-br from-blue-600 to-blue-800",
            (Some(_), _) => "",
        };

        let bg_style = background
            .as_deref()
            .map(|url| {
                format!(
                    "background-image: url({url}); background-size: cover; background-position: center;"
                )
            })
            .unwrap_or_default();

        let button_classes = if hero_or_background {
            "bg-white text-gray-900 hover:bg-gray-100"
        } else {
            "bg-blue-600 text-white hover:bg-blue-700"
        };

        let (title_classes, subtitle_classes) = if is_hero {
            ("text-4xl md:text-5xl font-bold", "text-xl opacity-90")
        } else {
            ("text-3xl md:text-4xl font-bold", "text-lg opacity-90")
        };

        let overlay = if hero_or_background {
            "<div class=\"absolute inset-0 bg-black/40\" style=\"pointer-events: none;\"></div>"
        } else {
            ""
        };

        format!(
            "<div class=\"cta-wrapper my-8\" style=\"margin: 2rem 0;\">\
             <div class=\"cta-container rounded-2xl overflow-hidden relative shadow-lg transition-all duration-300 {bg_classes}\" style=\"{bg_style}\">\
             {overlay}\
             <div class=\"relative z-10 p-8 md:p-12 flex flex-col gap-6 {layout_classes} {text_color_class}\">\
             <div class=\"flex flex-col gap-4 max-w-2xl\">\
             <h2 class=\"{title_classes}\">{title}</h2>\
             <p class=\"{subtitle_classes}\">{subtitle}</p>\
             </div>\
             <div class=\"flex-shrink-0\">\
             <a href=\"{button_url}\" class=\"inline-block px-6 py-3 rounded-lg font-semibold transition-transform hover:scale-105 active:scale-95 {button_classes}\">{button_text}</a>\
             </div>\
             </div>\
             </div>\
             </div>"
        )
    }
}

/// Escaped background image URL, or `None` when the image is absent or
/// unusable under the current URL policy.
fn background_url(ctx: &RenderContext<'_>, raw: &str) -> Option<String> {
    let url = ctx.safe_url(raw).filter(|url| !url.is_empty())?;
    if ctx.config().url_policy == UrlPolicy::Strict && !is_css_url_safe(url) {
        return None;
    }
    Some(html_escape(url))
}
