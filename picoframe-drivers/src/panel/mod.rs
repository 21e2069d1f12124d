//! Panel adapters
//!
//! One module per display controller. Each adapter owns a
//! [`picoframe_hal::PanelBus`] plus its control lines and implements
//! [`picoframe_display::Transport`] for its board.
//!
//! Init tables are carried as opaque data; nothing here interprets the
//! vendor registers beyond the addressing and brightness commands the
//! swap pipeline needs.

pub mod co5300;
pub mod gc9a01;
pub mod sh8601;
pub mod st7789;

pub use co5300::Co5300;
pub use gc9a01::{Gc9a01, Orientation};
pub use sh8601::Sh8601;
pub use st7789::St7789;

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use picoframe_display::Window;
use picoframe_hal::{OutputPin, PanelBus};

/// Column address set
pub const CASET: u8 = 0x2A;
/// Row address set
pub const RASET: u8 = 0x2B;
/// Memory access control (scan direction, RGB order)
pub const MADCTL: u8 = 0x36;
/// Display brightness register on the AMOLED controllers
pub const WRDISBV: u8 = 0x51;

/// Panel adapter errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError<B, P = Infallible> {
    /// The panel bus failed
    Bus(B),
    /// The backlight output failed
    Backlight(P),
}

/// One entry of a controller init table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitCommand<'a> {
    pub cmd: u8,
    pub params: &'a [u8],
    /// Pause after the command
    pub delay_ms: u32,
}

impl InitCommand<'static> {
    pub const fn new(cmd: u8, params: &'static [u8], delay_ms: u32) -> Self {
        Self {
            cmd,
            params,
            delay_ms,
        }
    }
}

/// Send each command as its own transaction, pausing where requested
pub fn run_init_table<'a, B, D>(
    bus: &mut B,
    delay: &mut D,
    table: impl IntoIterator<Item = InitCommand<'a>>,
) -> Result<(), B::Error>
where
    B: PanelBus,
    D: DelayNs,
{
    for step in table {
        bus.command(step.cmd, step.params)?;
        if step.delay_ms > 0 {
            delay.delay_ms(step.delay_ms);
        }
    }
    Ok(())
}

/// Decoder for packed init sequences
///
/// Each entry is `len, delay, cmd, params...` where `len` counts the
/// command byte plus its parameters and `delay` is in units of 5 ms. A
/// zero length ends the sequence; so does a truncated entry.
#[derive(Debug, Clone)]
pub struct PackedSequence<'a> {
    data: &'a [u8],
}

impl<'a> PackedSequence<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for PackedSequence<'a> {
    type Item = InitCommand<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&len, rest) = self.data.split_first()?;
        let len = usize::from(len);
        if len == 0 {
            return None;
        }

        let (&delay, rest) = rest.split_first()?;
        if rest.len() < len {
            self.data = &[];
            return None;
        }

        let (entry, rest) = rest.split_at(len);
        self.data = rest;
        Some(InitCommand {
            cmd: entry[0],
            params: &entry[1..],
            delay_ms: u32::from(delay) * 5,
        })
    }
}

/// Hardware reset pulse timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResetTiming {
    /// High time before the pulse, 0 to start low immediately
    pub pre_high_ms: u32,
    /// Pulse length
    pub low_ms: u32,
    /// Wait after releasing reset
    pub settle_ms: u32,
}

impl ResetTiming {
    /// Equal high, low and settle phases
    pub const fn symmetric(ms: u32) -> Self {
        Self {
            pre_high_ms: ms,
            low_ms: ms,
            settle_ms: ms,
        }
    }

    /// Drive `rst` through the pulse
    pub fn pulse<RST: OutputPin, D: DelayNs>(&self, rst: &mut RST, delay: &mut D) {
        if self.pre_high_ms > 0 {
            rst.set_high();
            delay.delay_ms(self.pre_high_ms);
        }
        rst.set_low();
        delay.delay_ms(self.low_ms);
        rst.set_high();
        delay.delay_ms(self.settle_ms);
    }
}

/// Per-board panel settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Column where the visible area starts in controller RAM
    pub x_offset: u16,
    /// Row where the visible area starts in controller RAM
    pub y_offset: u16,
    /// Reset pulse
    pub reset: ResetTiming,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            x_offset: 0,
            y_offset: 0,
            reset: ResetTiming::symmetric(100),
        }
    }
}

/// Program CASET/RASET for `window` shifted by the panel offset
pub(crate) fn program_window<B: PanelBus>(
    bus: &mut B,
    config: &PanelConfig,
    window: Window,
) -> Result<(), B::Error> {
    let window = window.offset(config.x_offset, config.y_offset);
    bus.command(CASET, &window.column_params())?;
    bus.command(RASET, &window.row_params())
}

/// Map 0-100 to the AMOLED brightness register range 0x25..=0xFF
pub const fn amoled_brightness(level: u8) -> u8 {
    let level = (if level > 100 { 100 } else { level }) as u16;
    (0x25 + level * (0xFF - 0x25) / 100) as u8
}
