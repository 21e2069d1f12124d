//! RGB332 → RGB565 palette
//!
//! The palette is derived from the index alone: each 3/3/2-bit channel is
//! rescaled to 8 bits with truncating integer division and repacked as
//! RGB565. Nothing about it is hand-authored, so every build produces the
//! same table.

use crate::color::Rgb565;

/// Number of palette entries (one per RGB332 index)
pub const PALETTE_SIZE: usize = 256;

/// Compute the full palette table
pub const fn build_palette() -> [u16; PALETTE_SIZE] {
    let mut table = [0u16; PALETTE_SIZE];
    let mut i = 0;
    while i < PALETTE_SIZE {
        let r3 = ((i >> 5) & 0x07) as u16;
        let g3 = ((i >> 2) & 0x07) as u16;
        let b2 = (i & 0x03) as u16;

        let r8 = (r3 * 255 / 7) as u8;
        let g8 = (g3 * 255 / 7) as u8;
        let b8 = (b2 * 255 / 3) as u8;

        table[i] = Rgb565::from_rgb888(r8, g8, b8).into_raw();
        i += 1;
    }
    table
}

/// Immutable index → RGB565 lookup table
#[derive(Clone)]
pub struct Palette {
    entries: [u16; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// Build the palette
    pub const fn new() -> Self {
        Self {
            entries: build_palette(),
        }
    }

    /// Expand a framebuffer index to its RGB565 color
    #[inline]
    pub fn color(&self, index: u8) -> Rgb565 {
        Rgb565(self.entries[index as usize])
    }

    /// Raw table
    pub fn entries(&self) -> &[u16; PALETTE_SIZE] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb565_to_rgb332;
    use proptest::prelude::*;

    #[test]
    fn test_palette_endpoints() {
        let palette = Palette::new();
        assert_eq!(palette.color(0x00), Rgb565::BLACK);
        assert_eq!(palette.color(0xFF), Rgb565::WHITE);
        assert_eq!(palette.color(0b111_000_00), Rgb565::RED);
        assert_eq!(palette.color(0b000_111_00), Rgb565::GREEN);
        assert_eq!(palette.color(0b000_000_11), Rgb565::BLUE);
    }

    #[test]
    fn test_palette_mid_values() {
        let palette = Palette::new();
        // r3=1 → r8=36 (0b0010_0100) → 0x2000
        assert_eq!(palette.color(0b001_000_00).into_raw(), 0x2000);
        // b2=1 → b8=85 → 85 >> 3 = 10
        assert_eq!(palette.color(0b000_000_01).into_raw(), 10);
        // g3=3 → g8=109 → (109 & 0xFC) << 3 = 0x360
        assert_eq!(palette.color(0b000_011_00).into_raw(), 0x0360);
    }

    #[test]
    fn test_every_index_is_a_fixed_point() {
        let table = build_palette();
        for i in 0..PALETTE_SIZE {
            assert_eq!(rgb565_to_rgb332(table[i]) as usize, i);
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build_palette(), build_palette());
        assert_eq!(Palette::new().entries(), &build_palette());
    }

    proptest! {
        #[test]
        fn prop_requantize_is_idempotent(color in any::<u16>()) {
            let palette = Palette::new();
            let index = rgb565_to_rgb332(color);
            let expanded = palette.color(index);
            prop_assert_eq!(expanded.to_index(), index);
        }
    }
}
