//! Bitmap fonts
//!
//! Five fixed-pitch sizes covering printable ASCII. Each glyph is stored
//! as `height` rows of `ceil(width / 8)` bytes, most significant bit
//! first.

mod glyphs;
mod tables;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glyphs::{GLYPHS_8X16, GLYPHS_8X8};
use tables::{GLYPHS_12X20, GLYPHS_16X24, GLYPHS_8X12};

/// First character with a glyph
pub const FIRST_CHAR: u8 = 32;
/// Last character with a glyph
pub const LAST_CHAR: u8 = 126;

/// Immutable glyph table plus its cell size
#[derive(Debug)]
pub struct FontTable {
    data: &'static [u8],
    width: u8,
    height: u8,
}

impl FontTable {
    /// Wrap a raw glyph table
    pub const fn new(data: &'static [u8], width: u8, height: u8) -> Self {
        Self {
            data,
            width,
            height,
        }
    }

    /// Glyph width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Glyph height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Bytes per glyph row
    pub const fn bytes_per_row(&self) -> usize {
        (self.width as usize + 7) / 8
    }

    /// Bitmap for `c`, or `None` outside 32..=126
    pub fn glyph(&self, c: char) -> Option<&'static [u8]> {
        let code = u32::from(c);
        if code < FIRST_CHAR as u32 || code > LAST_CHAR as u32 {
            return None;
        }

        let size = self.height as usize * self.bytes_per_row();
        let offset = (code - FIRST_CHAR as u32) as usize * size;
        self.data.get(offset..offset + size)
    }
}

/// Check one pixel of a glyph bitmap
#[inline]
pub(crate) fn glyph_bit(glyph: &[u8], bytes_per_row: usize, row: usize, col: usize) -> bool {
    glyph
        .get(row * bytes_per_row + col / 8)
        .is_some_and(|byte| byte & (0x80 >> (col % 8)) != 0)
}

pub static FONT8: FontTable = FontTable::new(&GLYPHS_8X8, 8, 8);
pub static FONT12: FontTable = FontTable::new(&GLYPHS_8X12, 8, 12);
pub static FONT16: FontTable = FontTable::new(&GLYPHS_8X16, 8, 16);
pub static FONT20: FontTable = FontTable::new(&GLYPHS_12X20, 12, 20);
pub static FONT24: FontTable = FontTable::new(&GLYPHS_16X24, 16, 24);

/// Selectable font size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum FontSize {
    /// 8x8
    XtraSmall = 0,
    /// 8x12
    Small = 1,
    /// 8x16
    #[default]
    Medium = 2,
    /// 12x20
    Large = 3,
    /// 16x24
    XtraLarge = 4,
}

impl FontSize {
    /// Map a numeric size (0..=4), falling back to `Medium`
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::XtraSmall,
            1 => Self::Small,
            2 => Self::Medium,
            3 => Self::Large,
            4 => Self::XtraLarge,
            _ => Self::Medium,
        }
    }

    /// Glyph table for this size
    pub fn table(self) -> &'static FontTable {
        match self {
            Self::XtraSmall => &FONT8,
            Self::Small => &FONT12,
            Self::Medium => &FONT16,
            Self::Large => &FONT20,
            Self::XtraLarge => &FONT24,
        }
    }
}

impl From<u8> for FontSize {
    fn from(index: u8) -> Self {
        Self::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(FontSize::from_index(0), FontSize::XtraSmall);
        assert_eq!(FontSize::from_index(4), FontSize::XtraLarge);
        assert_eq!(FontSize::from_index(5), FontSize::Medium);
        assert_eq!(FontSize::from(255), FontSize::Medium);
    }

    #[test]
    fn test_table_sizes() {
        let expected = [(8, 8), (8, 12), (8, 16), (12, 20), (16, 24)];
        for (i, (w, h)) in expected.iter().enumerate() {
            let table = FontSize::from_index(i as u8).table();
            assert_eq!((table.width(), table.height()), (*w, *h));

            let glyph = table.glyph('~').unwrap();
            assert_eq!(glyph.len(), table.bytes_per_row() * *h as usize);
        }
    }

    #[test]
    fn test_glyph_range() {
        assert!(FONT8.glyph(' ').is_some());
        assert!(FONT8.glyph('~').is_some());
        assert!(FONT8.glyph('\n').is_none());
        assert!(FONT8.glyph('\u{7f}').is_none());
        assert!(FONT8.glyph('é').is_none());
    }

    #[test]
    fn test_glyph_offset() {
        let a = FONT8.glyph('A').unwrap();
        assert_eq!(a, &GLYPHS_8X8[33 * 8..34 * 8]);
    }

    #[test]
    fn test_glyph_bit() {
        let glyph = [0x80, 0x01, 0x00, 0x40];
        assert!(glyph_bit(&glyph, 1, 0, 0));
        assert!(glyph_bit(&glyph, 1, 1, 7));
        assert!(!glyph_bit(&glyph, 1, 2, 3));
        // two bytes per row: col 9 is bit 6 of the second byte
        assert!(glyph_bit(&glyph, 2, 1, 9));
        assert!(!glyph_bit(&glyph, 2, 5, 0));
    }
}
