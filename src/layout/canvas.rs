//! # Canvas and Page Buffers
//!
//! A [`Canvas`] is the unit of rendered output: an 8-bit grayscale buffer at
//! the fixed print width, white background (255), black ink (0). Every block
//! renderer produces exactly one canvas; the compositor stacks them into a
//! [`Page`].
//!
//! Canvases stay grayscale until protocol encoding, where the page is
//! re-binarized with error-diffusion dithering. This lets anti-aliased glyph
//! edges and photographic content degrade gracefully instead of clipping at
//! a hard threshold.

/// An 8-bit grayscale raster buffer with fixed width and variable height.
///
/// 255 = white (paper), 0 = black (ink). Renderers return canvases by value;
/// once handed to the compositor a canvas is never mutated again.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Create a white canvas.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![255; (width * height) as usize],
        }
    }

    /// Wrap an existing row-major grayscale buffer.
    ///
    /// `data.len()` must equal `width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height) as usize);
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel data, one byte per pixel.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel value at (x, y). Out-of-bounds reads are white.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 255;
        }
        self.data[(y as u32 * self.width + x as u32) as usize]
    }

    /// Set a pixel to an explicit shade. Out-of-bounds writes are dropped.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, shade: u8) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.data[(y as u32 * self.width + x as u32) as usize] = shade;
    }

    /// Apply ink with the given coverage (0.0 = none, 1.0 = solid black).
    ///
    /// Coverage accumulates: overlapping glyph fragments darken, never
    /// lighten. Used by anti-aliased glyph rasterization.
    #[inline]
    pub fn ink(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        let shade = (255.0 * (1.0 - coverage.clamp(0.0, 1.0))) as u8;
        self.data[idx] = self.data[idx].min(shade);
    }

    /// Draw a horizontal line at `y` from `x0` to `x1` (exclusive) in the
    /// given shade.
    pub fn hline(&mut self, y: i32, x0: i32, x1: i32, shade: u8) {
        for x in x0..x1 {
            self.put(x, y, shade);
        }
    }

    /// Copy `src` onto this canvas with its top-left corner at (x, y).
    pub fn paste(&mut self, src: &Canvas, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            for sx in 0..src.width as i32 {
                let shade = src.get(sx, sy);
                if shade != 255 {
                    self.put(x + sx, y + sy, shade);
                }
            }
        }
    }
}

/// An ordered stack of canvases forming one print job.
///
/// All member canvases share the page width; the page height is the exact
/// sum of member heights. A page always holds at least one canvas: the
/// compositor returns `None` instead of an empty page.
#[derive(Debug, Clone)]
pub struct Page {
    canvases: Vec<Canvas>,
}

impl Page {
    /// Build a page from rendered canvases.
    pub fn new(canvases: Vec<Canvas>) -> Self {
        debug_assert!(!canvases.is_empty(), "a Page is never empty");
        debug_assert!(
            canvases.windows(2).all(|w| w[0].width == w[1].width),
            "all canvases on a page share one width"
        );
        Self { canvases }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.canvases[0].width
    }

    /// Exact sum of member canvas heights. No cropping, no padding.
    pub fn height(&self) -> u32 {
        self.canvases.iter().map(|c| c.height).sum()
    }

    pub fn canvases(&self) -> &[Canvas] {
        &self.canvases
    }

    /// Composite all canvases top-to-bottom at x=0 into one buffer.
    pub fn flatten(&self) -> Canvas {
        let mut out = Canvas::blank(self.width(), self.height());
        let mut y = 0i32;
        for canvas in &self.canvases {
            out.paste(canvas, 0, y);
            y += canvas.height as i32;
        }
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_is_white() {
        let c = Canvas::blank(8, 4);
        assert_eq!(c.data().len(), 32);
        assert!(c.data().iter().all(|&p| p == 255));
    }

    #[test]
    fn put_and_get() {
        let mut c = Canvas::blank(8, 4);
        c.put(3, 2, 0);
        assert_eq!(c.get(3, 2), 0);
        assert_eq!(c.get(0, 0), 255);
    }

    #[test]
    fn out_of_bounds_is_safe() {
        let mut c = Canvas::blank(8, 4);
        c.put(-1, 0, 0);
        c.put(8, 0, 0);
        c.put(0, 4, 0);
        assert!(c.data().iter().all(|&p| p == 255));
        assert_eq!(c.get(-1, -1), 255);
        assert_eq!(c.get(100, 100), 255);
    }

    #[test]
    fn ink_accumulates_darkness() {
        let mut c = Canvas::blank(4, 1);
        c.ink(0, 0, 0.5);
        let half = c.get(0, 0);
        assert!(half > 0 && half < 255);
        // A lighter pass on top never lightens
        c.ink(0, 0, 0.1);
        assert_eq!(c.get(0, 0), half);
        // A darker pass darkens
        c.ink(0, 0, 1.0);
        assert_eq!(c.get(0, 0), 0);
    }

    #[test]
    fn hline_draws_span() {
        let mut c = Canvas::blank(10, 3);
        c.hline(1, 2, 8, 180);
        for x in 2..8 {
            assert_eq!(c.get(x, 1), 180);
        }
        assert_eq!(c.get(1, 1), 255);
        assert_eq!(c.get(8, 1), 255);
    }

    #[test]
    fn paste_offsets_content() {
        let mut src = Canvas::blank(2, 2);
        src.put(0, 0, 0);
        src.put(1, 1, 0);

        let mut dst = Canvas::blank(6, 6);
        dst.paste(&src, 3, 2);
        assert_eq!(dst.get(3, 2), 0);
        assert_eq!(dst.get(4, 3), 0);
        assert_eq!(dst.get(3, 3), 255);
    }

    #[test]
    fn page_height_is_sum_of_canvases() {
        let page = Page::new(vec![
            Canvas::blank(384, 30),
            Canvas::blank(384, 12),
            Canvas::blank(384, 40),
        ]);
        assert_eq!(page.height(), 82);
        assert_eq!(page.width(), 384);
    }

    #[test]
    fn flatten_stacks_in_order() {
        let mut top = Canvas::blank(4, 2);
        top.put(0, 0, 0);
        let mut bottom = Canvas::blank(4, 3);
        bottom.put(3, 2, 0);

        let page = Page::new(vec![top, bottom]);
        let flat = page.flatten();
        assert_eq!(flat.height(), 5);
        assert_eq!(flat.get(0, 0), 0);
        // Bottom canvas content lands below the top canvas
        assert_eq!(flat.get(3, 4), 0);
        assert_eq!(flat.get(3, 2), 255);
    }
}
