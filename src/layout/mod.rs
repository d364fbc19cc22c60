//! # Block Layout and Page Composition
//!
//! Turns declarative content blocks into grayscale canvases at the fixed
//! print width and stacks them into a single page:
//!
//! ```text
//! blocks → render (per block) → canvases → compose → Page
//! ```
//!
//! Rendering is pure CPU work over the injected font provider; per-block
//! failures never cross block boundaries. The compositor downgrades them to
//! warnings and keeps going.

mod canvas;
mod compose;
mod image;
mod schema;
mod text;

pub use canvas::{Canvas, Page};
pub use compose::{compose, BOTTOM_MARGIN};
pub use schema::{
    Align, Block, ImageB64Block, ImageUrlBlock, ListBlock, PrintRequest, SeparatorBlock, TextBlock,
};

use std::sync::Arc;

use crate::font::FontProvider;

/// Word-wrap width heuristic: average glyph advance relative to font size.
///
/// Wrapping is approximate by design. The character budget per line is
/// `width / (font_size * WRAP_ASPECT)`, which can overflow or under-fill
/// slightly depending on the actual font metrics. Kept configurable on the
/// [`RenderContext`] rather than replaced with metric-exact wrapping, since
/// changing it changes visual output.
pub const WRAP_ASPECT: f32 = 0.58;

/// Everything block renderers need, injected once per request.
#[derive(Clone)]
pub struct RenderContext {
    /// Print width in dots; every canvas is exactly this wide.
    pub width: u32,
    /// Font size used when a block does not specify one.
    pub base_font_size: u32,
    /// See [`WRAP_ASPECT`].
    pub wrap_aspect: f32,
    pub fonts: Arc<dyn FontProvider>,
}

impl RenderContext {
    pub fn new(width: u32, base_font_size: u32, fonts: Arc<dyn FontProvider>) -> Self {
        Self {
            width,
            base_font_size,
            wrap_aspect: WRAP_ASPECT,
            fonts,
        }
    }
}
