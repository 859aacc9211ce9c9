//! Built-in node renderers, one per editor block type.

mod container;
mod cta;
mod form;
mod gallery;
mod media;
mod text;

pub use container::Container;
pub use cta::CallToAction;
pub use form::FormBlock;
pub use gallery::Gallery;
pub use media::{Image, VideoEmbed};
pub use text::{Heading, HorizontalRule};
