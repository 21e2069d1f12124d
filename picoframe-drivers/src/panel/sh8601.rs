//! SH8601 bar AMOLED (172x640, QSPI with DMA)
//!
//! Used on the 3.49" board. Pixel chunks go out by DMA; the next chunk
//! is expanded only once the channel has gone idle. Brightness uses the
//! same register and deferral as the CO5300.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use picoframe_display::{BrightnessMode, DisplayConfig, FontSize, Frame, Transport, Window};
use picoframe_hal::{DmaPanelBus, OutputPin};

use super::{
    amoled_brightness, program_window, run_init_table, InitCommand, PanelConfig, PanelError,
    ResetTiming, WRDISBV,
};
use crate::stream::stream_dma;

pub const WIDTH: usize = 172;
pub const HEIGHT: usize = 640;

/// Eight scanlines of RGB565
pub const CHUNK_BYTES: usize = WIDTH * 8 * 2;

const fn cmd(cmd: u8, params: &'static [u8]) -> InitCommand<'static> {
    InitCommand::new(cmd, params, 0)
}

// Vendor power, timing and gamma setup; the register meanings are not
// documented.
#[rustfmt::skip]
const INIT_TABLE: &[InitCommand<'static>] = &[
    cmd(0xBB, &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x5A, 0xA5]),
    cmd(0xA0, &[0x00, 0x30, 0x00, 0x02, 0x00, 0x00, 0x04, 0x3F, 0x20, 0x05, 0x3F, 0x3F, 0x00, 0x00,
                0x00, 0x00, 0x00]),
    cmd(0xA2, &[0x30, 0x19, 0x60, 0x64, 0x9B, 0x22, 0x38, 0x80, 0xAC, 0x28, 0x7F, 0x7F, 0x7F, 0x20,
                0xF8, 0x10, 0x02, 0xFF, 0xFF, 0xF0, 0x90, 0x01, 0x32, 0xA0, 0x91, 0xC0, 0x20, 0x7F,
                0xFF, 0x00, 0x54]),
    cmd(0xD0, &[0x80, 0xAC, 0x21, 0x24, 0x08, 0x09, 0x10, 0x01, 0x80, 0x12, 0xC2, 0x00, 0x22, 0x22,
                0xAA, 0x03, 0x10, 0x12, 0x40, 0x14, 0x1E, 0x51, 0x15, 0x00, 0x40, 0x10, 0x00, 0x03,
                0x7D, 0x12]),
    cmd(0xA3, &[0xA0, 0x06, 0xAA, 0x00, 0x08, 0x02, 0x0A, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04,
                0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x55, 0x55]),
    cmd(0xC1, &[0x33, 0x04, 0x02, 0x02, 0x71, 0x05, 0x24, 0x55, 0x02, 0x00, 0x41, 0x00, 0x53, 0xFF,
                0xFF, 0xFF, 0x4F, 0x52, 0x00, 0x4F, 0x52, 0x00, 0x45, 0x3B, 0x0B, 0x02, 0x0D, 0x00,
                0xFF, 0x40]),
    cmd(0xC3, &[0x00, 0x00, 0x00, 0x50, 0x03, 0x00, 0x00, 0x00, 0x01, 0x80, 0x01]),
    cmd(0xC4, &[0x00, 0x24, 0x33, 0x80, 0x11, 0xEA, 0x64, 0x32, 0xC8, 0x64, 0xC8, 0x32, 0x90, 0x90,
                0x11, 0x06, 0xDC, 0xFA, 0x00, 0x00, 0x80, 0xFE, 0x10, 0x10, 0x00, 0x0A, 0x0A, 0x44,
                0x50]),
    cmd(0xC5, &[0x18, 0x00, 0x00, 0x03, 0xFE, 0x08, 0x68, 0x30, 0x10, 0x10, 0x88, 0xDE, 0x0D, 0x08,
                0x0F, 0x0F, 0x01, 0x08, 0x68, 0x30, 0x10, 0x10, 0x00]),
    cmd(0xC6, &[0x05, 0x0A, 0x05, 0x0A, 0x00, 0xE0, 0x2E, 0x0B, 0x12, 0x22, 0x12, 0x22, 0x01, 0x00,
                0x00, 0x3F, 0x6A, 0x18, 0xC8, 0x22]),
    cmd(0xC7, &[0x50, 0x32, 0x28, 0x00, 0xA2, 0x80, 0x8F, 0x00, 0x80, 0xFF, 0x07, 0x11, 0x9F, 0x6F,
                0xFF, 0x24, 0x0C, 0x0D, 0x0E, 0x0F]),
    cmd(0xC9, &[0x33, 0x44, 0x44, 0x01]),
    cmd(0xCF, &[0x2C, 0x1E, 0x88, 0x58, 0x13, 0x18, 0x56, 0x18, 0x1E, 0x68, 0xF8, 0x00, 0x66, 0x0D,
                0x22, 0xC4, 0x0C, 0x77, 0x22, 0x44, 0xAA, 0x55, 0x04, 0x04, 0x12, 0xA0, 0x08]),
    cmd(0xD5, &[0x50, 0x60, 0x8A, 0x00, 0x35, 0x04, 0x60, 0x10, 0x03, 0x03, 0x03, 0x00, 0x04, 0x02,
                0x13, 0x46, 0x03, 0x03, 0x03, 0x03, 0x86, 0x00, 0x00, 0x00, 0x80, 0x52, 0x7C, 0x00,
                0x00, 0x00]),
    cmd(0xD6, &[0x10, 0x32, 0x54, 0x76, 0x98, 0xBA, 0xDC, 0xFE, 0x00, 0x00, 0x01, 0x83, 0x03, 0x03,
                0x33, 0x03, 0x03, 0x33, 0x3F, 0x03, 0x03, 0x03, 0x20, 0x20, 0x00, 0x24, 0x51, 0x23,
                0x01, 0x00]),
    cmd(0xD7, &[0x18, 0x1A, 0x1B, 0x1F, 0x0A, 0x08, 0x0E, 0x0C, 0x00, 0x1F, 0x1D, 0x1F, 0x50, 0x60,
                0x04, 0x00, 0x1F, 0x1F, 0x1F]),
    cmd(0xD8, &[0x18, 0x1A, 0x1B, 0x1F, 0x0B, 0x09, 0x0F, 0x0D, 0x01, 0x1F, 0x1D, 0x1F]),
    cmd(0xD9, &[0x0F, 0x09, 0x0B, 0x1F, 0x18, 0x19, 0x1F, 0x01, 0x1E, 0x1D, 0x1F]),
    cmd(0xDD, &[0x0E, 0x08, 0x0A, 0x1F, 0x18, 0x19, 0x1F, 0x00, 0x1E, 0x1A, 0x1F]),
    cmd(0xDF, &[0x44, 0x73, 0x4B, 0x69, 0x00, 0x0A, 0x02, 0x90]),
    cmd(0xE0, &[0x35, 0x08, 0x19, 0x1C, 0x0C, 0x09, 0x13, 0x2A, 0x54, 0x21, 0x0B, 0x15, 0x13, 0x25,
                0x27, 0x08, 0x00]),
    cmd(0xE1, &[0x3E, 0x08, 0x19, 0x1C, 0x0C, 0x08, 0x13, 0x2A, 0x54, 0x21, 0x0B, 0x14, 0x13, 0x26,
                0x27, 0x08, 0x0F]),
    cmd(0xE2, &[0x19, 0x20, 0x0A, 0x11, 0x09, 0x06, 0x11, 0x25, 0xD4, 0x22, 0x0B, 0x13, 0x12, 0x2D,
                0x32, 0x2F, 0x03]),
    cmd(0xE3, &[0x38, 0x20, 0x0A, 0x11, 0x09, 0x06, 0x11, 0x25, 0xC4, 0x21, 0x0A, 0x12, 0x11, 0x2C,
                0x32, 0x2F, 0x27]),
    cmd(0xE4, &[0x19, 0x20, 0x0D, 0x14, 0x0D, 0x08, 0x12, 0x2A, 0xD4, 0x26, 0x0E, 0x15, 0x13, 0x34,
                0x39, 0x2F, 0x03]),
    cmd(0xE5, &[0x38, 0x20, 0x0D, 0x13, 0x0D, 0x07, 0x12, 0x29, 0xC4, 0x25, 0x0D, 0x15, 0x12, 0x33,
                0x39, 0x2F, 0x27]),
    cmd(0xA4, &[0x85, 0x85, 0x95, 0x82, 0xAF, 0xAA, 0xAA, 0x80, 0x10, 0x30, 0x40, 0x40, 0x20, 0xFF,
                0x60, 0x30]),
    cmd(0xA4, &[0x85, 0x85, 0x95, 0x85]),
    cmd(0xBB, &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    InitCommand::new(0x11, &[], 120),
    InitCommand::new(0x29, &[], 20),
];

/// SH8601 on a DMA-capable bus
pub struct Sh8601<B, RST, D, const N: usize = CHUNK_BYTES> {
    bus: B,
    rst: RST,
    delay: D,
    config: PanelConfig,
    chunk: [u8; N],
}

impl<B, RST, D, const N: usize> Sh8601<B, RST, D, N>
where
    B: DmaPanelBus,
    RST: OutputPin,
    D: DelayNs,
{
    pub const DEFAULT_CONFIG: DisplayConfig = DisplayConfig {
        default_font: FontSize::Medium,
        default_brightness: 50,
    };

    pub const PANEL_CONFIG: PanelConfig = PanelConfig {
        x_offset: 0,
        y_offset: 0,
        reset: ResetTiming::symmetric(200),
    };

    pub fn new(bus: B, rst: RST, delay: D) -> Self {
        Self {
            bus,
            rst,
            delay,
            config: Self::PANEL_CONFIG,
            chunk: [0; N],
        }
    }

    pub fn write_command(&mut self, cmd: u8, params: &[u8]) -> Result<(), PanelError<B::Error>> {
        self.bus.command(cmd, params).map_err(PanelError::Bus)
    }

    pub fn release(self) -> (B, RST, D) {
        (self.bus, self.rst, self.delay)
    }
}

impl<B, RST, D, const N: usize> Transport for Sh8601<B, RST, D, N>
where
    B: DmaPanelBus,
    RST: OutputPin,
    D: DelayNs,
{
    type Error = PanelError<B::Error, Infallible>;

    fn init(&mut self) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("sh8601: init, {} registers", INIT_TABLE.len());

        self.reset()?;
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
        stream_dma(&mut self.bus, frame, &mut self.chunk).map_err(PanelError::Bus)
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        self.write_command(WRDISBV, &[amoled_brightness(level)])
    }

    fn brightness_mode(&self) -> BrightnessMode {
        BrightnessMode::Deferred
    }
}
