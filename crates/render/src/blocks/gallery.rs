use serde_json::Value;

use crate::document::{Attrs, Node};
use crate::escape::html_escape;
use crate::registry::NodeRenderer;
use crate::renderer::RenderContext;

const EMPTY_GALLERY: &str = "<div class=\"gallery-empty border-2 border-dashed border-gray-300 rounded-lg p-12 text-center text-gray-500\">No images in gallery</div>";

/// `gallery`: a set of images laid out as a grid, masonry columns or a
/// slideshow.
///
/// Images live in `attrs.images` as flat `{src, alt, caption}` objects, not
/// as child nodes. Slideshows get a unique element id and expose their
/// autoplay settings as data attributes for the client-side carousel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gallery;

struct GalleryImage {
    src: String,
    alt: String,
    caption: String,
}

impl GalleryImage {
    fn from_value(value: &Value, ctx: &RenderContext<'_>) -> Option<Self> {
        let attrs = Attrs::new(Some(value.as_object()?));
        Some(Self {
            src: ctx.url_attr(attrs.str_or("src", ""), ""),
            alt: html_escape(attrs.str_or("alt", "")),
            caption: html_escape(attrs.str_or("caption", "")),
        })
    }
}

struct Settings {
    show_captions: bool,
    autoplay: bool,
    autoplay_speed: u64,
    gap: u64,
    columns: u64,
}

impl NodeRenderer for Gallery {
    fn render(&self, node: &Node, ctx: &mut RenderContext<'_>) -> String {
        let attrs = node.attrs();
        let view: &RenderContext<'_> = ctx;
        let images: Vec<GalleryImage> = attrs
            .array("images")
            .iter()
            .filter_map(|value| GalleryImage::from_value(value, view))
            .collect();

        if images.is_empty() {
            return EMPTY_GALLERY.to_string();
        }

        let settings = Settings {
            show_captions: attrs.bool_or("showCaptions", false),
            autoplay: attrs.bool_or("autoplay", true),
            autoplay_speed: attrs.u64_or("autoplaySpeed", 3000),
            gap: attrs.u64_or("gap", 8),
            columns: attrs.u64_or("columns", 3).max(1),
        };

        let body = match attrs.str_or("layout", "standard") {
            "masonry" => masonry(&images, &settings),
            "slideshow" => {
                let id = ctx.next_id("gallery");
                slideshow(&images, &settings, &html_escape(&id))
            }
            _ => standard(&images, &settings),
        };

        format!("<div class=\"gallery-wrapper my-8\">{body}</div>")
    }
}

fn caption_paragraph(image: &GalleryImage, settings: &Settings) -> String {
    if settings.show_captions && !image.caption.is_empty() {
        format!("<p class=\"mt-2 text-sm text-gray-600\">{}</p>", image.caption)
    } else {
        String::new()
    }
}

fn masonry(images: &[GalleryImage], settings: &Settings) -> String {
    let mut html = format!(
        "<div class=\"masonry-gallery\" style=\"column-count: {}; column-gap: {}px;\">",
        settings.columns, settings.gap
    );
    for image in images {
        html.push_str("<div class=\"masonry-item mb-4\" style=\"break-inside: avoid;\">");
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" class=\"w-full rounded-lg\">",
            image.src, image.alt
        ));
        html.push_str(&caption_paragraph(image, settings));
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

fn slideshow(images: &[GalleryImage], settings: &Settings, id: &str) -> String {
    let mut html = format!(
        "<div class=\"swiper-gallery relative\" id=\"{id}\" data-autoplay=\"{}\" \
         data-autoplay-speed=\"{}\" data-gap=\"{}\">",
        settings.autoplay, settings.autoplay_speed, settings.gap
    );
    html.push_str("<div class=\"swiper\"><div class=\"swiper-wrapper\">");
    for image in images {
        html.push_str("<div class=\"swiper-slide relative\">");
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" class=\"w-full h-auto rounded-lg\">",
            image.src, image.alt
        ));
        if settings.show_captions && !image.caption.is_empty() {
            html.push_str(&format!(
                "<div class=\"absolute bottom-0 left-0 right-0 bg-black/60 text-white p-4 rounded-b-lg\">\
                 <p class=\"text-sm\">{}</p></div>",
                image.caption
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    // Navigation and pagination need at least two slides.
    if images.len() > 1 {
        html.push_str(
            "<div class=\"swiper-button-next\"></div>\
             <div class=\"swiper-button-prev\"></div>\
             <div class=\"swiper-pagination\"></div>",
        );
    }
    html.push_str("</div></div>");
    html
}

fn standard(images: &[GalleryImage], settings: &Settings) -> String {
    let mut html = format!(
        "<div class=\"standard-gallery grid\" style=\"grid-template-columns: repeat({}, 1fr); gap: {}px;\">",
        settings.columns, settings.gap
    );
    for image in images {
        html.push_str("<div class=\"standard-item\">");
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" class=\"w-full h-48 object-cover rounded-lg\">",
            image.src, image.alt
        ));
        html.push_str(&caption_paragraph(image, settings));
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}
