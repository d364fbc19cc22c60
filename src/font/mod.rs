//! # Glyph Metrics and Drawing
//!
//! Text rendering is built around a small capability seam: a [`Typeface`]
//! answers per-character advance widths and line height, and draws single
//! glyphs onto a [`Canvas`]. Renderers never touch font files directly; they
//! receive a [`FontSet`] (primary face plus optional emoji face) from an
//! injected [`FontProvider`].
//!
//! ## Emoji Fallback
//!
//! Characters inside the emoji codepoint ranges are measured and drawn with
//! the emoji face when one is available. The cursor advances by whichever
//! face actually drew the glyph: if the emoji face cannot draw a character,
//! the primary face is retried silently and its advance is used instead.
//!
//! ## Implementations
//!
//! - [`TtfTypeface`]: ab_glyph-backed system TTF fonts (anti-aliased)
//! - [`FallbackTypeface`]: deterministic box glyphs, used when no usable
//!   font file exists and by tests
//! - [`FontBook`]: the system-font [`FontProvider`] with bold variants and
//!   Noto Emoji probing

mod book;
mod fallback;
mod ttf;

pub use book::FontBook;
pub use fallback::FallbackTypeface;
pub use ttf::TtfTypeface;

use std::sync::Arc;

use crate::layout::Canvas;

/// A single font face at a fixed pixel size.
///
/// Implementations may memoize metrics internally but expose no mutable
/// state: two calls with the same character always agree.
pub trait Typeface: Send + Sync {
    /// Horizontal advance of one character, in pixels.
    fn advance(&self, ch: char) -> u32;

    /// Line height for this face, in pixels (ascent to descent plus leading).
    fn line_height(&self) -> u32;

    /// Draw one character with its top-left text origin at (x, y).
    ///
    /// Returns `false` if the face has no glyph for the character, in which
    /// case nothing was drawn and the caller should fall back.
    fn draw_char(&self, canvas: &mut Canvas, x: i32, y: i32, ch: char) -> bool;
}

/// Resolves a font request (size, weight, optional family name) to a
/// [`FontSet`]. Injected into the render context at construction.
pub trait FontProvider: Send + Sync {
    fn resolve(&self, size: u32, bold: bool, font_name: Option<&str>) -> FontSet;
}

/// A primary face paired with an optional emoji face of matching size.
#[derive(Clone)]
pub struct FontSet {
    primary: Arc<dyn Typeface>,
    emoji: Option<Arc<dyn Typeface>>,
}

impl FontSet {
    pub fn new(primary: Arc<dyn Typeface>, emoji: Option<Arc<dyn Typeface>>) -> Self {
        Self { primary, emoji }
    }

    /// Line height of the primary face.
    pub fn line_height(&self) -> u32 {
        self.primary.line_height()
    }

    /// The face that will be asked to draw a given character.
    fn face_for(&self, ch: char) -> &dyn Typeface {
        if is_emoji(ch) {
            if let Some(emoji) = &self.emoji {
                return emoji.as_ref();
            }
        }
        self.primary.as_ref()
    }

    /// Measure a string character by character, dispatching emoji to the
    /// emoji face. Always an exact sum of per-character advances.
    pub fn measure(&self, text: &str) -> u32 {
        text.chars().map(|ch| self.face_for(ch).advance(ch)).sum()
    }

    /// Draw a string at (x, y), advancing per character. Emoji that the
    /// emoji face cannot draw are retried with the primary face, and the
    /// cursor advances by the face that drew. Returns the final x position.
    pub fn draw(&self, canvas: &mut Canvas, x: i32, y: i32, text: &str) -> i32 {
        let mut cx = x;
        for ch in text.chars() {
            let face = self.face_for(ch);
            if face.draw_char(canvas, cx, y, ch) {
                cx += face.advance(ch) as i32;
            } else {
                self.primary.draw_char(canvas, cx, y, ch);
                cx += self.primary.advance(ch) as i32;
            }
        }
        cx
    }
}

/// Emoji codepoint ranges rendered with the fallback emoji face.
///
/// Covers the main emoji blocks plus miscellaneous symbols, dingbats,
/// playing cards, technical symbols and arrows.
pub fn is_emoji(ch: char) -> bool {
    let code = ch as u32;
    (0x1F300..=0x1FAFF).contains(&code)
        || (0x2600..=0x27BF).contains(&code)
        || (0x1F000..=0x1F02F).contains(&code)
        || (0x1F0A0..=0x1F0FF).contains(&code)
        || (0x2300..=0x23FF).contains(&code)
        || (0x2B00..=0x2BFF).contains(&code)
}

// ============================================================================
// TESTS
// ============================================================================
