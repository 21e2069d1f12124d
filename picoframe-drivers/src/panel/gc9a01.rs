//! GC9A01 round LCD (240x240, SPI)
//!
//! Used on the 1.28" board. Backlight is a PWM channel, so brightness
//! changes take effect immediately.

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;
use picoframe_display::{DisplayConfig, FontSize, Frame, Transport, Window};
use picoframe_hal::{OutputPin, PanelBus};

use super::{
    program_window, run_init_table, InitCommand, PanelConfig, PanelError, ResetTiming, MADCTL,
};
use crate::stream::stream_pixels;

pub const WIDTH: usize = 240;
pub const HEIGHT: usize = 240;

/// Scan direction written to MADCTL before the init table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    const fn madctl(self) -> u8 {
        match self {
            Orientation::Horizontal => 0xC8,
            Orientation::Vertical => 0x68,
        }
    }
}

const fn cmd(cmd: u8, params: &'static [u8]) -> InitCommand<'static> {
    InitCommand::new(cmd, params, 0)
}

#[rustfmt::skip]
const INIT_TABLE: &[InitCommand<'static>] = &[
    cmd(0xEF, &[]),
    cmd(0xEB, &[0x14]),
    cmd(0xFE, &[]),
    cmd(0xEF, &[]),
    cmd(0xEB, &[0x14]),
    cmd(0x84, &[0x40]),
    cmd(0x85, &[0xFF]),
    cmd(0x86, &[0xFF]),
    cmd(0x87, &[0xFF]),
    cmd(0x88, &[0x0A]),
    cmd(0x89, &[0x21]),
    cmd(0x8A, &[0x00]),
    cmd(0x8B, &[0x80]),
    cmd(0x8C, &[0x01]),
    cmd(0x8D, &[0x01]),
    cmd(0x8E, &[0xFF]),
    cmd(0x8F, &[0xFF]),
    cmd(0xB6, &[0x00, 0x20]),
    cmd(0x36, &[0x08]),
    cmd(0x3A, &[0x05]),
    cmd(0x90, &[0x08, 0x08, 0x08, 0x08]),
    cmd(0xBD, &[0x06]),
    cmd(0xBC, &[0x00]),
    cmd(0xFF, &[0x60, 0x01, 0x04]),
    cmd(0xC3, &[0x13]),
    cmd(0xC4, &[0x13]),
    cmd(0xC9, &[0x22]),
    cmd(0xBE, &[0x11]),
    cmd(0xE1, &[0x10, 0x0E]),
    cmd(0xDF, &[0x21, 0x0C, 0x02]),
    cmd(0xF0, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    cmd(0xF1, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    cmd(0xF2, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    cmd(0xF3, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    cmd(0xED, &[0x1B, 0x0B]),
    cmd(0xAE, &[0x77]),
    cmd(0xCD, &[0x63]),
    cmd(0x70, &[0x07, 0x07, 0x04, 0x0E, 0x0F, 0x09, 0x07, 0x08, 0x03]),
    cmd(0xE8, &[0x34]),
    cmd(0x62, &[0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70]),
    cmd(0x63, &[0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70]),
    cmd(0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    cmd(0x66, &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00]),
    cmd(0x67, &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98]),
    cmd(0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    cmd(0x98, &[0x3E, 0x07]),
    cmd(0x35, &[]),
    cmd(0x21, &[]),
    InitCommand::new(0x11, &[], 120),
    InitCommand::new(0x29, &[], 20),
];

/// GC9A01 on a [`PanelBus`] with a reset line and PWM backlight
pub struct Gc9a01<B, RST, BL, D> {
    bus: B,
    rst: RST,
    backlight: BL,
    delay: D,
    orientation: Orientation,
    config: PanelConfig,
}

impl<B, RST, BL, D> Gc9a01<B, RST, BL, D>
where
    B: PanelBus,
    RST: OutputPin,
    BL: SetDutyCycle,
    D: DelayNs,
{
    pub const DEFAULT_CONFIG: DisplayConfig = DisplayConfig {
        default_font: FontSize::Small,
        default_brightness: 30,
    };

    pub const PANEL_CONFIG: PanelConfig = PanelConfig {
        x_offset: 0,
        y_offset: 0,
        reset: ResetTiming::symmetric(100),
    };

    pub fn new(bus: B, rst: RST, backlight: BL, delay: D, orientation: Orientation) -> Self {
        Self {
            bus,
            rst,
            backlight,
            delay,
            orientation,
            config: Self::PANEL_CONFIG,
        }
    }

    /// Send one raw command with parameters
    pub fn write_command(
        &mut self,
        cmd: u8,
        params: &[u8],
    ) -> Result<(), PanelError<B::Error, BL::Error>> {
        self.bus.command(cmd, params).map_err(PanelError::Bus)
    }

    pub fn release(self) -> (B, RST, BL, D) {
        (self.bus, self.rst, self.backlight, self.delay)
    }
}

impl<B, RST, BL, D> Transport for Gc9a01<B, RST, BL, D>
where
    B: PanelBus,
    RST: OutputPin,
    BL: SetDutyCycle,
    D: DelayNs,
{
    type Error = PanelError<B::Error, BL::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("gc9a01: init {}", self.orientation);

        self.reset()?;
        self.write_command(MADCTL, &[self.orientation.madctl()])?;
        run_init_table(&mut self.bus, &mut self.delay, INIT_TABLE.iter().copied())
            .map_err(PanelError::Bus)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.config.reset.pulse(&mut self.rst, &mut self.delay);
        Ok(())
    }

    fn set_window(&mut self, window: Window) -> Result<(), Self::Error> {
        program_window(&mut self.bus, &self.config, window).map_err(PanelError::Bus)
    }

    fn send_frame(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        stream_pixels(&mut self.bus, frame).map_err(PanelError::Bus)
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        self.backlight
            .set_duty_cycle_percent(level.min(100))
            .map_err(PanelError::Backlight)
    }
}
