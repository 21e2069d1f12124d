//! RGB565 colors and RGB332 quantization
//!
//! The drawing API always takes 16-bit RGB565 colors. The framebuffer
//! stores one 8-bit RGB332 palette index per pixel, so every color is
//! quantized exactly once on its way in.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 16-bit RGB565 color (5 bits red, 6 bits green, 5 bits blue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const WHITE: Self = Self(0xFFFF);
    pub const BLACK: Self = Self(0x0000);
    pub const BLUE: Self = Self(0x001F);
    pub const CYAN: Self = Self(0x07FF);
    pub const RED: Self = Self(0xF800);
    pub const LIGHTGREY: Self = Self(0xD69A);
    pub const DARKGREY: Self = Self(0x7BEF);
    pub const GREEN: Self = Self(0x07E0);
    pub const DARKCYAN: Self = Self(0x03EF);
    pub const DARKGREEN: Self = Self(0x03E0);
    pub const SKYBLUE: Self = Self(0x867D);
    pub const VIOLET: Self = Self(0x915C);
    pub const BROWN: Self = Self(0x9A60);
    pub const TRANSPARENT: Self = Self(0x0120);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const ORANGE: Self = Self(0xFDA0);
    pub const PINK: Self = Self(0xFE19);

    /// Pack 8-bit channels into RGB565, dropping the low bits of each
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }

    /// Raw 16-bit value
    pub const fn into_raw(self) -> u16 {
        self.0
    }

    /// Quantize to the RGB332 palette index stored in the framebuffer
    pub const fn to_index(self) -> u8 {
        rgb565_to_rgb332(self.0)
    }

    /// Big-endian byte pair, the order every supported panel expects
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}

/// Reduce an RGB565 value to RGB332
///
/// Keeps the top 3 bits of red, the top 3 bits of green and the top 2
/// bits of blue. Distinct inputs can collapse to the same index.
pub const fn rgb565_to_rgb332(color: u16) -> u8 {
    (((color & 0xE000) >> 8) | ((color & 0x0700) >> 6) | ((color & 0x0018) >> 3)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_primaries() {
        assert_eq!(Rgb565::WHITE.to_index(), 0xFF);
        assert_eq!(Rgb565::BLACK.to_index(), 0x00);
        assert_eq!(Rgb565::RED.to_index(), 0b111_000_00);
        assert_eq!(Rgb565::GREEN.to_index(), 0b000_111_00);
        assert_eq!(Rgb565::BLUE.to_index(), 0b000_000_11);
    }

    #[test]
    fn test_quantize_is_lossy() {
        // Only the low bits differ, so both land on the same index
        assert_eq!(rgb565_to_rgb332(0xF800), rgb565_to_rgb332(0xF807));
        assert_eq!(rgb565_to_rgb332(0x0001), rgb565_to_rgb332(0x0000));
    }

    #[test]
    fn test_from_rgb888() {
        assert_eq!(Rgb565::from_rgb888(255, 255, 255), Rgb565::WHITE);
        assert_eq!(Rgb565::from_rgb888(0, 0, 0), Rgb565::BLACK);
        assert_eq!(Rgb565::from_rgb888(255, 0, 0), Rgb565::RED);
        assert_eq!(Rgb565::from_rgb888(0, 255, 0), Rgb565::GREEN);
        assert_eq!(Rgb565::from_rgb888(0, 0, 255), Rgb565::BLUE);
    }

    #[test]
    fn test_big_endian_bytes() {
        assert_eq!(Rgb565(0xF81F).to_be_bytes(), [0xF8, 0x1F]);
        assert_eq!(u16::from(Rgb565::from(0x1234)), 0x1234);
    }
}
