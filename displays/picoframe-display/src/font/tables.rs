//! Derived glyph tables
//!
//! The 8x12, 12x20 and 16x24 sizes are nearest-neighbor rescales of the
//! base bitmaps, computed at compile time.

use super::glyphs::{GLYPH_COUNT, GLYPHS_8X16, GLYPHS_8X8};

const fn bytes_per_row(width: usize) -> usize {
    (width + 7) / 8
}

/// Rescale an 8-pixel-wide table to `dst_w` x `dst_h`
///
/// `N` must equal `GLYPH_COUNT * dst_h * ceil(dst_w / 8)`.
const fn scale<const N: usize>(src: &[u8], src_h: usize, dst_w: usize, dst_h: usize) -> [u8; N] {
    let dst_bpr = bytes_per_row(dst_w);
    let mut out = [0u8; N];

    let mut glyph = 0;
    while glyph < GLYPH_COUNT {
        let src_base = glyph * src_h;
        let dst_base = glyph * dst_h * dst_bpr;

        let mut dy = 0;
        while dy < dst_h {
            let src_row = src[src_base + dy * src_h / dst_h];

            let mut dx = 0;
            while dx < dst_w {
                let sx = dx * 8 / dst_w;
                if src_row & (0x80 >> sx) != 0 {
                    out[dst_base + dy * dst_bpr + dx / 8] |= 0x80 >> (dx % 8);
                }
                dx += 1;
            }
            dy += 1;
        }
        glyph += 1;
    }
    out
}

/// 8x12 glyphs
pub static GLYPHS_8X12: [u8; GLYPH_COUNT * 12] = scale(&GLYPHS_8X8, 8, 8, 12);

/// 12x20 glyphs, two bytes per row
pub static GLYPHS_12X20: [u8; GLYPH_COUNT * 20 * 2] = scale(&GLYPHS_8X16, 16, 12, 20);

/// 16x24 glyphs, two bytes per row
pub static GLYPHS_16X24: [u8; GLYPH_COUNT * 24 * 2] = scale(&GLYPHS_8X16, 16, 16, 24);
