//! Display configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::font::FontSize;

/// Highest brightness level
pub const MAX_BRIGHTNESS: u8 = 100;

/// Power-on settings applied by [`crate::Display::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Font selected after init
    pub default_font: FontSize,
    /// Brightness after init (0-100)
    pub default_brightness: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_font: FontSize::Medium,
            default_brightness: 50,
        }
    }
}

impl DisplayConfig {
    /// Clamp out-of-range values
    pub fn sanitized(self) -> Self {
        Self {
            default_font: self.default_font,
            default_brightness: self.default_brightness.min(MAX_BRIGHTNESS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DisplayConfig::default();
        assert_eq!(config.default_font, FontSize::Medium);
        assert_eq!(config.default_brightness, 50);
    }

    #[test]
    fn test_sanitized_clamps_brightness() {
        let config = DisplayConfig {
            default_font: FontSize::Small,
            default_brightness: 180,
        }
        .sanitized();
        assert_eq!(config.default_brightness, 100);
        assert_eq!(config.default_font, FontSize::Small);
    }
}
