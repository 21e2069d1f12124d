//! Board pin maps
//!
//! GPIO assignments for the panel on each supported board, plus a
//! check that a map uses every line once and only valid GPIOs.

use heapless::{FnvIndexSet, Vec};

use crate::pio::SYS_CLK_HZ;

/// GPIOs on the RP2040 and the RP2350A
pub const GPIO_COUNT: u8 = 30;

/// Supported boards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Board {
    /// 1.28" round LCD, GC9A01
    Lcd128,
    /// PicoGo robot, ST7789
    PicoGo,
    /// 1.43" round AMOLED, CO5300
    Amoled143,
}

/// How the panel's data lines are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdBus {
    /// SPI block, MOSI plus a D/C line
    Spi { mosi: u8, dc: u8 },
    /// PIO shifter, data plus a D/C line
    Pio { data: u8, dc: u8 },
    /// Four data lines, D0 first
    Qspi { data: [u8; 4] },
}

/// Errors from [`BoardPins::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// GPIO number out of range
    InvalidPin(u8),
    /// GPIO used for more than one line
    Conflict(u8),
}

/// Panel wiring of one board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    pub clk: u8,
    pub cs: u8,
    pub rst: u8,
    pub bus: LcdBus,
    /// PWM or on/off backlight
    pub backlight: Option<u8>,
    /// Panel power enable
    pub power: Option<u8>,
    /// Bus clock in Hz
    pub bus_hz: u32,
}

impl BoardPins {
    pub const fn for_board(board: Board) -> Self {
        match board {
            Board::Lcd128 => Self {
                clk: 10,
                cs: 9,
                rst: 13,
                bus: LcdBus::Spi { mosi: 11, dc: 8 },
                backlight: Some(25),
                power: None,
                bus_hz: 40_000_000,
            },
            // pio1, divider 1.0
            Board::PicoGo => Self {
                clk: 10,
                cs: 9,
                rst: 12,
                bus: LcdBus::Pio { data: 11, dc: 8 },
                backlight: Some(13),
                power: None,
                bus_hz: SYS_CLK_HZ / 2,
            },
            Board::Amoled143 => Self {
                clk: 10,
                cs: 15,
                rst: 16,
                bus: LcdBus::Qspi {
                    data: [11, 12, 13, 14],
                },
                backlight: None,
                power: Some(19),
                bus_hz: 75_000_000,
            },
        }
    }

    /// Every GPIO the map claims
    pub fn pins(&self) -> Vec<u8, 10> {
        let mut pins = Vec::new();
        let mut claim = |pin: u8| {
            // at most 9 lines per map
            let _ = pins.push(pin);
        };

        claim(self.clk);
        claim(self.cs);
        claim(self.rst);
        match self.bus {
            LcdBus::Spi { mosi, dc } => {
                claim(mosi);
                claim(dc);
            }
            LcdBus::Pio { data, dc } => {
                claim(data);
                claim(dc);
            }
            LcdBus::Qspi { data } => data.iter().for_each(|&pin| claim(pin)),
        }
        if let Some(pin) = self.backlight {
            claim(pin);
        }
        if let Some(pin) = self.power {
            claim(pin);
        }
        pins
    }

    /// Check the map for out-of-range or shared GPIOs
    pub fn validate(&self) -> Result<(), PinError> {
        let mut claimed: FnvIndexSet<u8, 16> = FnvIndexSet::new();
        for pin in self.pins() {
            if pin >= GPIO_COUNT {
                return Err(PinError::InvalidPin(pin));
            }
            if !claimed.insert(pin).map_err(|_| PinError::Conflict(pin))? {
                return Err(PinError::Conflict(pin));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_maps_are_valid() {
        for board in [Board::Lcd128, Board::PicoGo, Board::Amoled143] {
            assert_eq!(BoardPins::for_board(board).validate(), Ok(()));
        }
    }

    #[test]
    fn test_pins() {
        let pins = BoardPins::for_board(Board::Amoled143).pins();
        assert_eq!(pins.as_slice(), &[10, 15, 16, 11, 12, 13, 14, 19]);
    }

    #[test]
    fn test_conflict() {
        let mut map = BoardPins::for_board(Board::Lcd128);
        map.backlight = Some(map.cs);
        assert_eq!(map.validate(), Err(PinError::Conflict(9)));
    }

    #[test]
    fn test_invalid_pin() {
        let mut map = BoardPins::for_board(Board::PicoGo);
        map.power = Some(30);
        assert_eq!(map.validate(), Err(PinError::InvalidPin(30)));
    }
}
