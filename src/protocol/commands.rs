//! Printer command bytes.

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;

/// Lines fed after the raster body so the print clears the tear bar.
pub const FEED_LINES: u8 = 3;

/// ESC @ : reset the printer to its power-on state.
pub fn reset() -> [u8; 2] {
    [ESC, b'@']
}

/// GS v 0 : raster bit image header, normal density.
///
/// Width is given in bytes per row, height in dot rows, both as
/// little-endian u16.
pub fn raster_header(width_bytes: u16, height: u16) -> [u8; 8] {
    let [wl, wh] = width_bytes.to_le_bytes();
    let [hl, hh] = height.to_le_bytes();
    [GS, b'v', b'0', 0x00, wl, wh, hl, hh]
}

/// ESC d n : feed n lines.
pub fn feed(lines: u8) -> [u8; 3] {
    [ESC, b'd', lines]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_bytes() {
        assert_eq!(reset(), [0x1B, 0x40]);
    }

    #[test]
    fn raster_header_is_little_endian() {
        // 48 bytes per row, 300 rows
        assert_eq!(
            raster_header(48, 300),
            [0x1D, 0x76, 0x30, 0x00, 48, 0, 0x2C, 0x01]
        );
    }

    #[test]
    fn feed_bytes() {
        assert_eq!(feed(3), [0x1B, 0x64, 3]);
    }
}
