//! Page to byte stream.

use crate::layout::Page;
use crate::printer::PrinterConfig;
use crate::render::diffuse;

use super::commands;

/// A fully encoded print job, ready for the transport.
#[derive(Debug, Clone)]
pub struct EncodedJob {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl EncodedJob {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Page width in dots.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Page height in dot rows.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Encode a composed page for the given printer.
///
/// The stream is a reset, one raster transfer covering the whole page, and
/// a trailing feed. Pages taller than `u16::MAX` rows are clamped; in
/// practice a page that tall is several metres of paper.
pub fn encode(page: &Page, config: &PrinterConfig) -> EncodedJob {
    let flat = page.flatten();
    let body = diffuse(&flat);

    let height = flat.height().min(u16::MAX as u32) as u16;
    let bytes_per_row = config.width_bytes as usize;

    let mut bytes = Vec::with_capacity(2 + 8 + body.len() + 3);
    bytes.extend_from_slice(&commands::reset());
    bytes.extend_from_slice(&commands::raster_header(config.width_bytes, height));
    bytes.extend_from_slice(&body[..bytes_per_row * height as usize]);
    bytes.extend_from_slice(&commands::feed(commands::FEED_LINES));

    EncodedJob {
        bytes,
        width: flat.width(),
        height: flat.height(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
