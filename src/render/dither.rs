//! Floyd-Steinberg error diffusion.

use crate::layout::Canvas;

/// Dither a grayscale canvas into packed 1-bit rows.
///
/// Input pixels are 0 (ink) to 255 (paper). Output is `width / 8` bytes per
/// row, MSB first, with a set bit meaning a black dot. Quantization error is
/// diffused with the classic 7/16, 3/16, 5/16, 1/16 kernel:
///
/// ```text
///           *   7/16
///   3/16  5/16  1/16
/// ```
pub fn diffuse(canvas: &Canvas) -> Vec<u8> {
    let width = canvas.width() as usize;
    let height = canvas.height() as usize;
    let bytes_per_row = width.div_ceil(8);

    // Work in ink intensity: 0.0 is paper, 1.0 is solid black.
    let mut intensity: Vec<f32> = canvas
        .data()
        .iter()
        .map(|&px| 1.0 - px as f32 / 255.0)
        .collect();

    let mut packed = vec![0u8; bytes_per_row * height];

    for y in 0..height {
        let mut row = vec![false; width];
        for x in 0..width {
            let idx = y * width + x;
            let old = intensity[idx];
            let black = old >= 0.5;
            row[x] = black;

            let error = old - if black { 1.0 } else { 0.0 };
            if x + 1 < width {
                intensity[idx + 1] += error * 7.0 / 16.0;
            }
            if y + 1 < height {
                let below = idx + width;
                if x > 0 {
                    intensity[below - 1] += error * 3.0 / 16.0;
                }
                intensity[below] += error * 5.0 / 16.0;
                if x + 1 < width {
                    intensity[below + 1] += error * 1.0 / 16.0;
                }
            }
        }
        pack_row(&row, &mut packed[y * bytes_per_row..(y + 1) * bytes_per_row]);
    }

    packed
}

/// Pack one row of dots into bytes, MSB first.
fn pack_row(row: &[bool], out: &mut [u8]) {
    for (x, &black) in row.iter().enumerate() {
        if black {
            out[x / 8] |= 0x80 >> (x % 8);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
