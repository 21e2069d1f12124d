//! ST7789 LCD (240x135 landscape, PIO serializer)
//!
//! The PicoGo panel. Its controller RAM is 320x240, so the visible
//! area sits at column 40, row 53. The backlight is a plain on/off
//! line.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use picoframe_display::{DisplayConfig, FontSize, Frame, Transport, Window};
use picoframe_hal::{OutputPin, PanelBus};

use super::{program_window, run_init_table, PackedSequence, PanelConfig, PanelError, ResetTiming};
use crate::stream::stream_pixels;

pub const WIDTH: usize = 240;
pub const HEIGHT: usize = 135;

/// `len, delay/5ms, cmd, params...`, zero-terminated
#[rustfmt::skip]
const INIT_SEQUENCE: &[u8] = &[
    1, 20, 0x01,                         // software reset
    1, 10, 0x11,                         // sleep out
    2, 2, 0x3A, 0x55,                    // 16 bpp
    2, 0, 0x36, 0x70,                    // landscape
    5, 0, 0x2A, 0x00, 0x28, 0x01, 0x17,
    5, 0, 0x2B, 0x00, 0x35, 0x00, 0xBB,
    1, 2, 0x21,                          // inversion on
    1, 2, 0x13,                          // normal display
    1, 2, 0x29,                          // display on
    0,
];

/// ST7789 with a reset line and on/off backlight
pub struct St7789<B, RST, BL, D> {
    bus: B,
    rst: RST,
    backlight: BL,
    delay: D,
    config: PanelConfig,
}

impl<B, RST, BL, D> St7789<B, RST, BL, D>
where
    B: PanelBus,
    RST: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    pub const DEFAULT_CONFIG: DisplayConfig = DisplayConfig {
        default_font: FontSize::Small,
        default_brightness: 100,
    };

    pub const PANEL_CONFIG: PanelConfig = PanelConfig {
        x_offset: 40,
        y_offset: 53,
        reset: ResetTiming::symmetric(100),
    };

    pub fn new(bus: B, rst: RST, backlight: BL, delay: D) -> Self {
        Self {
            bus,
            rst,
            backlight,
            delay,
            config: Self::PANEL_CONFIG,
        }
    }

    pub fn write_command(&mut self, cmd: u8, params: &[u8]) -> Result<(), PanelError<B::Error>> {
        self.bus.command(cmd, params).map_err(PanelError::Bus)
    }

    pub fn release(self) -> (B, RST, BL, D) {
        (self.bus, self.rst, self.backlight, self.delay)
    }
}

impl<B, RST, BL, D> Transport for St7789<B, RST, BL, D>
where
    B: PanelBus,
    RST: OutputPin,
    BL: OutputPin,
    D: DelayNs,
{
    type Error = PanelError<B::Error, Infallible>;

    fn init(&mut self) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::info!("st7789: init");

        self.reset()?;
        run_init_table(&mut self.bus, &mut self.delay, PackedSequence::new(INIT_SEQUENCE))
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

    /// Any non-zero level turns the backlight on
    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error> {
        self.backlight.set_state(level > 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::PioPanelBus;
    use crate::mock::{Log, MockDelay, MockPin, MockSerial, Op};
    use picoframe_display::{Display, FrameStorage};

    type Panel = St7789<PioPanelBus<MockSerial, MockPin, MockPin, MockDelay>, MockPin, MockPin, MockDelay>;

    fn panel(log: &Log) -> Panel {
        let bus = PioPanelBus::new(
            MockSerial(log.clone()),
            log.pin("dc"),
            log.pin("cs"),
            MockDelay(log.clone()),
        );
        let panel = St7789::new(bus, log.pin("rst"), log.pin("bl"), MockDelay(log.clone()));
        log.take();
        panel
    }

    fn bytes(ops: &[Op]) -> Vec<u8> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Put(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_init_runs_packed_sequence() {
        let log = Log::new();
        let mut panel = panel(&log);
        panel.init().unwrap();

        let ops = log.take();
        assert_eq!(
            bytes(&ops),
            [
                0x01, 0x11, 0x3A, 0x55, 0x36, 0x70, 0x2A, 0x00, 0x28, 0x01, 0x17, 0x2B, 0x00,
                0x35, 0x00, 0xBB, 0x21, 0x13, 0x29,
            ]
        );

        let delays: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                Op::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect();
        // three reset phases, then the per-command pauses
        assert_eq!(delays, [100, 100, 100, 100, 50, 10, 10, 10, 10]);
    }

    #[test]
    fn test_window_uses_offsets() {
        let log = Log::new();
        let mut panel = panel(&log);
        panel.set_window(Window::full(240, 135)).unwrap();

        assert_eq!(
            bytes(&log.take()),
            [0x2A, 0x00, 0x28, 0x01, 0x17, 0x2B, 0x00, 0x35, 0x00, 0xBB]
        );
    }

    #[test]
    fn test_backlight_on_off() {
        let log = Log::new();
        let mut storage: FrameStorage<WIDTH, HEIGHT> = [[0; WIDTH]; HEIGHT];
        let mut display = Display::new(panel(&log), &mut storage, Panel::DEFAULT_CONFIG);

        display.init().unwrap();
        assert_eq!(log.take().last(), Some(&Op::Pin("bl", true)));

        display.set_backlight(0).unwrap();
        assert_eq!(log.take(), [Op::Pin("bl", false)]);
        display.set_backlight(1).unwrap();
        assert_eq!(log.take(), [Op::Pin("bl", true)]);
    }

    #[test]
    fn test_swap_streams_pixels() {
        let log = Log::new();
        let mut storage: FrameStorage<WIDTH, HEIGHT> = [[0; WIDTH]; HEIGHT];
        let mut display = Display::new(panel(&log), &mut storage, Panel::DEFAULT_CONFIG);
        display.init().unwrap();
        display.fill(picoframe_display::Rgb565::WHITE);
        log.take();

        display.swap().unwrap();
        let sent = bytes(&log.take());
        assert_eq!(sent.len(), 10 + 1 + WIDTH * HEIGHT * 2);
        assert_eq!(sent[10], 0x2C);
        assert!(sent[11..].iter().all(|&b| b == 0xFF));
    }
}
