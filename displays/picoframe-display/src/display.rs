//! Display core
//!
//! [`Display`] owns a framebuffer and a [`Transport`]. Drawing calls only
//! touch the framebuffer; [`Display::swap`] is the one place that talks
//! to the panel.

use crate::color::Rgb565;
use crate::config::{DisplayConfig, MAX_BRIGHTNESS};
use crate::font::{FontSize, FontTable};
use crate::framebuffer::{FrameStorage, Framebuffer};
use crate::palette::Palette;
use crate::transport::{BrightnessMode, Frame, Transport, Window};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// The transport reported a bus or pin failure
    Transport(E),
    /// `swap` was called before `init`
    NotInitialized,
}

impl<E> From<E> for DisplayError<E> {
    fn from(e: E) -> Self {
        Self::Transport(e)
    }
}

/// Brightness level plus whether it still has to reach the panel
#[derive(Debug, Clone, Copy, Default)]
struct Backlight {
    level: u8,
    pending: bool,
}

/// Framebuffered display on top of a panel transport
pub struct Display<'a, T, const W: usize, const H: usize> {
    transport: T,
    framebuffer: Framebuffer<'a, W, H>,
    palette: Palette,
    font: Option<(FontSize, &'static FontTable)>,
    backlight: Backlight,
    config: DisplayConfig,
    initialized: bool,
}

impl<'a, T: Transport, const W: usize, const H: usize> Display<'a, T, W, H> {
    /// Create a display over `storage`
    ///
    /// The framebuffer is cleared. No font is selected and nothing is
    /// sent to the panel until [`Display::init`].
    pub fn new(transport: T, storage: &'a mut FrameStorage<W, H>, config: DisplayConfig) -> Self {
        Self {
            transport,
            framebuffer: Framebuffer::new(storage),
            palette: Palette::new(),
            font: None,
            backlight: Backlight::default(),
            config: config.sanitized(),
            initialized: false,
        }
    }

    /// Bring the panel up
    ///
    /// Runs the transport's reset and init sequence, applies the default
    /// brightness and selects the default font. Calling it again once it
    /// has succeeded does nothing.
    pub fn init(&mut self) -> Result<(), DisplayError<T::Error>> {
        if self.initialized {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::info!("display: init {}x{}", W, H);

        self.transport.init()?;

        self.backlight = Backlight {
            level: self.config.default_brightness,
            pending: false,
        };
        self.transport.set_brightness(self.backlight.level)?;
        self.set_font(self.config.default_font);

        self.initialized = true;
        Ok(())
    }

    /// Pulse the panel's hardware reset line
    ///
    /// The controller loses its configuration; call [`Display::init`] on a
    /// fresh display or re-run the panel setup through the transport.
    pub fn reset(&mut self) -> Result<(), DisplayError<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("display: reset");

        self.transport.reset()?;
        Ok(())
    }

    /// Set brightness, clamped to 0-100
    ///
    /// Immediate transports apply it now. Deferred transports apply it
    /// after the next frame has been sent.
    pub fn set_backlight(&mut self, level: u8) -> Result<(), DisplayError<T::Error>> {
        let level = level.min(MAX_BRIGHTNESS);

        // the stored level only moves once an immediate write has landed
        match self.transport.brightness_mode() {
            BrightnessMode::Immediate => {
                self.transport.set_brightness(level)?;
                self.backlight.pending = false;
            }
            BrightnessMode::Deferred => self.backlight.pending = true,
        }
        self.backlight.level = level;

        #[cfg(feature = "defmt")]
        defmt::debug!("display: brightness {}", level);
        Ok(())
    }

    /// Select a font size
    ///
    /// Accepts a [`FontSize`] or a raw index; out-of-range indices fall
    /// back to [`FontSize::Medium`].
    pub fn set_font(&mut self, size: impl Into<FontSize>) {
        let size = size.into();
        self.font = Some((size, size.table()));

        #[cfg(feature = "defmt")]
        defmt::debug!("display: font {}", size);
    }

    /// Send the framebuffer to the panel
    ///
    /// Programs the full-screen window, streams every pixel, then applies
    /// any brightness change that was waiting for the frame to finish.
    pub fn swap(&mut self) -> Result<(), DisplayError<T::Error>> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        self.transport.set_window(Window::full(W as u16, H as u16))?;

        let frame = Frame::new(self.framebuffer.as_bytes(), W, H, &self.palette);
        self.transport.send_frame(&frame)?;

        if self.backlight.pending {
            self.transport.set_brightness(self.backlight.level)?;
            self.backlight.pending = false;

            #[cfg(feature = "defmt")]
            defmt::debug!("display: applied brightness {}", self.backlight.level);
        }
        Ok(())
    }

    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        self.framebuffer.draw_pixel(x, y, color);
    }

    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgb565) {
        self.framebuffer.draw_line(x1, y1, x2, y2, color);
    }

    pub fn draw_rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgb565) {
        self.framebuffer.draw_rect(x, y, width, height, color);
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgb565) {
        self.framebuffer.fill_rect(x, y, width, height, color);
    }

    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: u16, color: Rgb565) {
        self.framebuffer.draw_circle(cx, cy, radius, color);
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u16, color: Rgb565) {
        self.framebuffer.fill_circle(cx, cy, radius, color);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fill_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        color: Rgb565,
    ) {
        self.framebuffer.fill_triangle(x1, y1, x2, y2, x3, y3, color);
    }

    /// Draw one character in the current font
    ///
    /// Does nothing until a font has been selected.
    pub fn draw_char(&mut self, x: i32, y: i32, c: char, color: Rgb565) {
        if let Some((_, font)) = self.font {
            self.framebuffer.draw_char(font, x, y, c, color);
        }
    }

    /// Draw a string in the current font
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Rgb565) {
        if let Some((_, font)) = self.font {
            self.framebuffer.draw_text(font, x, y, text, color);
        }
    }

    pub fn fill(&mut self, color: Rgb565) {
        self.framebuffer.fill(color);
    }

    pub fn blit(&mut self, x: i32, y: i32, width: u16, height: u16, buffer: &[u8]) {
        self.framebuffer.blit(x, y, width, height, buffer);
    }

    /// Current brightness (0-100)
    pub fn backlight_level(&self) -> u8 {
        self.backlight.level
    }

    /// Selected font size, if any
    pub fn font_size(&self) -> Option<FontSize> {
        self.font.map(|(size, _)| size)
    }

    /// Glyph width of the current font, 0 without one
    pub fn font_width(&self) -> u8 {
        self.font.map_or(0, |(_, font)| font.width())
    }

    /// Glyph height of the current font, 0 without one
    pub fn font_height(&self) -> u8 {
        self.font.map_or(0, |(_, font)| font.height())
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (W, H)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn framebuffer(&self) -> &Framebuffer<'a, W, H> {
        &self.framebuffer
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Direct access to the panel, e.g. for raw controller commands
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }
}
