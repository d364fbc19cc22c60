//! Last-resort typeface with deterministic box glyphs.
//!
//! Used when no configured font file can be loaded, so text blocks still
//! produce legible-ish output instead of failing the whole page. Also the
//! typeface behind deterministic layout tests: advances depend only on the
//! configured pixel size.

use super::Typeface;
use crate::layout::Canvas;

/// Draws every printable character as a hollow box of fixed advance.
pub struct FallbackTypeface {
    px: u32,
}

impl FallbackTypeface {
    pub fn new(px: u32) -> Self {
        Self { px: px.max(4) }
    }
}

impl Typeface for FallbackTypeface {
    fn advance(&self, ch: char) -> u32 {
        if ch.is_whitespace() {
            (self.px * 3).div_ceil(10)
        } else {
            (self.px * 6).div_ceil(10)
        }
    }

    fn line_height(&self) -> u32 {
        self.px + 4
    }

    fn draw_char(&self, canvas: &mut Canvas, x: i32, y: i32, ch: char) -> bool {
        if ch.is_whitespace() {
            return true;
        }
        let w = self.advance(ch) as i32;
        let h = self.px as i32;
        // Hollow box inset by one pixel on each side
        for bx in x + 1..x + w - 1 {
            canvas.put(bx, y + 2, 0);
            canvas.put(bx, y + h - 2, 0);
        }
        for by in y + 2..=y + h - 2 {
            canvas.put(x + 1, by, 0);
            canvas.put(x + w - 2, by, 0);
        }
        true
    }
}
