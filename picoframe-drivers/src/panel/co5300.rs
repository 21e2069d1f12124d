//! CO5300 round AMOLED (466x466, QSPI)
//!
//! Used on the 1.43" board. Brightness is a controller register, and
//! writing it while a frame is being streamed tears the image, so
//! changes wait for the next swap.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use picoframe_display::{BrightnessMode, DisplayConfig, FontSize, Frame, Transport, Window};
use picoframe_hal::{OutputPin, PanelBus};

use super::{
    amoled_brightness, program_window, run_init_table, InitCommand, PanelConfig, PanelError,
    ResetTiming, WRDISBV,
};
use crate::stream::stream_blocking;

pub const WIDTH: usize = 466;
pub const HEIGHT: usize = 466;

/// Eight scanlines of RGB565
pub const CHUNK_BYTES: usize = WIDTH * 8 * 2;

const INIT_TABLE: &[InitCommand<'static>] = &[
    InitCommand::new(0x11, &[], 120),
    InitCommand::new(0xC4, &[0x80], 0),
    InitCommand::new(0x44, &[0x01, 0xD7], 0),
    InitCommand::new(0x35, &[0x00], 0),
    InitCommand::new(0x53, &[0x20], 10),
    InitCommand::new(0x29, &[], 10),
    InitCommand::new(0x51, &[0xA0], 0),
    InitCommand::new(0x20, &[], 0),
    InitCommand::new(0x36, &[0x00], 0),
    InitCommand::new(0x3A, &[0x05], 0),
];

/// CO5300 with reset and panel power lines
///
/// Pixels are expanded into an internal buffer of `N` bytes and written
/// with the CPU.
pub struct Co5300<B, RST, PWR, D, const N: usize = CHUNK_BYTES> {
    bus: B,
    rst: RST,
    power: PWR,
    delay: D,
    config: PanelConfig,
    chunk: [u8; N],
}

impl<B, RST, PWR, D, const N: usize> Co5300<B, RST, PWR, D, N>
where
    B: PanelBus,
    RST: OutputPin,
    PWR: OutputPin,
    D: DelayNs,
{
    pub const DEFAULT_CONFIG: DisplayConfig = DisplayConfig {
        default_font: FontSize::Medium,
        default_brightness: 50,
    };

    pub const PANEL_CONFIG: PanelConfig = PanelConfig {
        x_offset: 6,
        y_offset: 0,
        reset: ResetTiming {
            pre_high_ms: 0,
            low_ms: 100,
            settle_ms: 200,
        },
    };

    pub fn new(bus: B, rst: RST, power: PWR, delay: D) -> Self {
        Self {
            bus,
            rst,
            power,
            delay,
            config: Self::PANEL_CONFIG,
            chunk: [0; N],
        }
    }

    pub fn write_command(&mut self, cmd: u8, params: &[u8]) -> Result<(), PanelError<B::Error>> {
        self.bus.command(cmd, params).map_err(PanelError::Bus)
    }

    pub fn release(self) -> (B, RST, PWR, D) {
        (self.bus, self.rst, self.power, self.delay)
    }
}

impl<B, RST, PWR, D, const N: usize> Transport for Co5300<B, RST, PWR, D, N>
where
    B: PanelBus,
    RST: OutputPin,
    PWR: OutputPin,
    D: DelayNs,
{
    type Error = PanelError<B::Error, Infallible>;

    fn init(&mut self) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("co5300: power on");

        self.power.set_high();
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
        stream_blocking(&mut self.bus, frame, &mut self.chunk).map_err(PanelError::Bus)
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        let value = amoled_brightness(level);

        #[cfg(feature = "defmt")]
        defmt::debug!("co5300: brightness {} -> {=u8:#x}", level, value);

        self.write_command(WRDISBV, &[value])
    }

    fn brightness_mode(&self) -> BrightnessMode {
        BrightnessMode::Deferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::QspiPanelBus;
    use crate::mock::{Log, MockDelay, MockPin, MockQspi, Op};
    use picoframe_display::{Display, FrameStorage, Rgb565};

    type Panel = Co5300<QspiPanelBus<MockQspi, MockPin>, MockPin, MockPin, MockDelay>;

    fn panel(log: &Log) -> Panel {
        let bus = QspiPanelBus::new(MockQspi(log.clone()), log.pin("cs"));
        let panel = Co5300::new(bus, log.pin("rst"), log.pin("pwr"), MockDelay(log.clone()));
        log.take();
        panel
    }

    fn singles(ops: &[Op]) -> Vec<Vec<u8>> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Single(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_init_powers_up_first() {
        let log = Log::new();
        let mut panel = panel(&log);
        panel.init().unwrap();

        let ops = log.take();
        assert_eq!(
            ops[..5],
            [
                Op::Pin("pwr", true),
                Op::Pin("rst", false),
                Op::DelayMs(100),
                Op::Pin("rst", true),
                Op::DelayMs(200),
            ]
        );

        let writes = singles(&ops);
        assert_eq!(writes.len(), INIT_TABLE.len());
        assert_eq!(writes[0], vec![0x02, 0x00, 0x11, 0x00]);
        assert_eq!(writes[2], vec![0x02, 0x00, 0x44, 0x00, 0x01, 0xD7]);
        assert_eq!(writes[9], vec![0x02, 0x00, 0x3A, 0x00, 0x05]);
    }

    #[test]
    fn test_brightness_waits_for_swap() {
        let log = Log::new();
        let mut storage: FrameStorage<WIDTH, HEIGHT> = [[0; WIDTH]; HEIGHT];
        let mut display = Display::new(panel(&log), &mut storage, Panel::DEFAULT_CONFIG);

        display.init().unwrap();
        let ops = log.take();
        assert_eq!(
            singles(&ops).last(),
            Some(&vec![0x02, 0x00, 0x51, 0x00, amoled_brightness(50)])
        );

        display.set_backlight(100).unwrap();
        assert!(log.take().is_empty());
        assert_eq!(display.backlight_level(), 100);

        display.fill(Rgb565::BLUE);
        display.swap().unwrap();
        let ops = log.take();

        let writes = singles(&ops);
        assert_eq!(writes[0], vec![0x02, 0x00, 0x2A, 0x00, 0x00, 0x06, 0x01, 0xD7]);
        assert_eq!(writes[1], vec![0x02, 0x00, 0x2B, 0x00, 0x00, 0x00, 0x01, 0xD1]);
        assert_eq!(writes[2], vec![0x32, 0x00, 0x2C, 0x00]);
        assert_eq!(writes.last(), Some(&vec![0x02, 0x00, 0x51, 0x00, 0xFF]));

        let pixel_bytes: usize = ops
            .iter()
            .map(|op| match op {
                Op::Quad(bytes) => bytes.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(pixel_bytes, WIDTH * HEIGHT * 2);

        // nothing pending after the swap
        display.swap().unwrap();
        assert_ne!(singles(&log.take()).last(), Some(&vec![0x02, 0x00, 0x51, 0x00, 0xFF]));
    }

    #[test]
    fn test_chunks_are_whole_scanlines() {
        let log = Log::new();
        let mut panel = panel(&log);
        let palette = picoframe_display::Palette::new();
        let cells = vec![0u8; WIDTH * HEIGHT];
        let frame = Frame::new(&cells, WIDTH, HEIGHT, &palette);

        panel.send_frame(&frame).unwrap();
        let sizes: Vec<_> = log
            .take()
            .iter()
            .filter_map(|op| match op {
                Op::Quad(bytes) => Some(bytes.len()),
                _ => None,
            })
            .collect();
        assert_eq!(sizes.len(), 59);
        assert!(sizes[..58].iter().all(|&n| n == CHUNK_BYTES));
        assert_eq!(sizes[58], 2 * WIDTH * 2);
    }
}
