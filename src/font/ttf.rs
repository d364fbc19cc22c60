//! ab_glyph-backed typeface.
//!
//! Renders anti-aliased glyph coverage onto the grayscale canvas; the page
//! is dithered to 1-bit later, so smooth edges survive as halftone texture.

use std::collections::HashMap;
use std::sync::Mutex;

use ab_glyph::{Font, FontArc, ScaleFont};

use super::Typeface;
use crate::layout::Canvas;

/// Extra leading added below the font's own ascent+descent, matching the
/// measured "Ay" bounding box plus 4px used by the layout heuristics.
const LINE_LEADING: u32 = 4;

/// A TTF/OTF font face scaled to a fixed pixel size.
pub struct TtfTypeface {
    font: FontArc,
    px: f32,
    /// Advance widths are looked up per character while wrapping and
    /// measuring; memoized behind a lock, invisible to callers.
    advances: Mutex<HashMap<char, u32>>,
}

impl TtfTypeface {
    pub fn new(font: FontArc, px: f32) -> Self {
        Self {
            font,
            px,
            advances: Mutex::new(HashMap::new()),
        }
    }

    fn ascent(&self) -> f32 {
        self.font.as_scaled(self.px).ascent()
    }
}

impl Typeface for TtfTypeface {
    fn advance(&self, ch: char) -> u32 {
        if let Some(&w) = self.advances.lock().unwrap().get(&ch) {
            return w;
        }
        let scaled = self.font.as_scaled(self.px);
        let w = scaled.h_advance(self.font.glyph_id(ch)).round() as u32;
        self.advances.lock().unwrap().insert(ch, w);
        w
    }

    fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.px);
        (scaled.ascent() - scaled.descent()).ceil() as u32 + LINE_LEADING
    }

    fn draw_char(&self, canvas: &mut Canvas, x: i32, y: i32, ch: char) -> bool {
        let glyph_id = self.font.glyph_id(ch);
        if glyph_id.0 == 0 && !ch.is_whitespace() {
            // .notdef: signal fallback instead of printing tofu
            return false;
        }

        let baseline = y as f32 + self.ascent();
        let glyph = glyph_id.with_scale_and_position(
            self.px,
            ab_glyph::point(x as f32, baseline),
        );

        if let Some(outlined) = self.font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|px, py, coverage| {
                let cx = px as i32 + bounds.min.x as i32;
                let cy = py as i32 + bounds.min.y as i32;
                canvas.ink(cx, cy, coverage);
            });
        }
        // Whitespace and mark glyphs may have no outline; that's still drawn
        true
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// Load any system DejaVu font if one exists; tests that need a real
    /// font file skip silently otherwise.
    fn system_font() -> Option<TtfTypeface> {
        let candidates = [
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        ];
        for path in candidates {
            if Path::new(path).exists() {
                let bytes = std::fs::read(path).ok()?;
                let font = FontArc::try_from_vec(bytes).ok()?;
                return Some(TtfTypeface::new(font, 24.0));
            }
        }
        None
    }

    #[test]
    fn test_metrics_when_font_available() {
        let Some(face) = system_font() else { return };
        assert!(face.advance('W') >= face.advance('i'));
        assert!(face.line_height() > 24);
        // Memoized advance stays stable
        assert_eq!(face.advance('W'), face.advance('W'));
    }

    #[test]
    fn test_draw_when_font_available() {
        let Some(face) = system_font() else { return };
        let mut canvas = Canvas::blank(100, 40);
        assert!(face.draw_char(&mut canvas, 4, 4, 'A'));
        assert!(canvas.data().iter().any(|&p| p < 255));
    }
}
