//! Panel transport boundary
//!
//! A [`Transport`] owns whatever bus a panel sits on and knows that
//! panel's command set. The display core only ever asks it for five
//! things: bring the panel up, reset it, program an address window,
//! stream a frame, and change brightness.
//!
//! Frames are handed over as palette indices plus the palette, so each
//! transport can expand them in whatever granularity its bus prefers
//! (one pixel at a time, or a few scanlines into a DMA buffer).

use crate::color::Rgb565;
use crate::palette::Palette;

/// Rectangular address window, in panel pixels before any offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Window {
    /// Window covering a whole `width` x `height` frame
    pub const fn full(width: u16, height: u16) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Last column, inclusive
    pub const fn x_end(&self) -> u16 {
        self.x + self.width.saturating_sub(1)
    }

    /// Last row, inclusive
    pub const fn y_end(&self) -> u16 {
        self.y + self.height.saturating_sub(1)
    }

    /// Shift the window by a controller offset
    pub const fn offset(self, dx: u16, dy: u16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Big-endian `[start_hi, start_lo, end_hi, end_lo]` column range
    pub const fn column_params(&self) -> [u8; 4] {
        let [sh, sl] = self.x.to_be_bytes();
        let [eh, el] = self.x_end().to_be_bytes();
        [sh, sl, eh, el]
    }

    /// Big-endian `[start_hi, start_lo, end_hi, end_lo]` row range
    pub const fn row_params(&self) -> [u8; 4] {
        let [sh, sl] = self.y.to_be_bytes();
        let [eh, el] = self.y_end().to_be_bytes();
        [sh, sl, eh, el]
    }
}

/// Read-only view of a framebuffer on its way to the panel
pub struct Frame<'a> {
    cells: &'a [u8],
    width: usize,
    height: usize,
    palette: &'a Palette,
}

impl<'a> Frame<'a> {
    /// Wrap `cells` (row-major, `width * height` long)
    ///
    /// When `cells` is short the frame keeps only its complete rows.
    /// Cells past `width * height` are ignored.
    pub fn new(cells: &'a [u8], width: usize, height: usize, palette: &'a Palette) -> Self {
        let height = match width {
            0 => 0,
            _ => height.min(cells.len() / width),
        };
        let cells = &cells[..width * height];
        Self {
            cells,
            width,
            height,
            palette,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Every pixel in scan order, expanded to RGB565
    pub fn pixels(&self) -> impl Iterator<Item = Rgb565> + '_ {
        self.cells.iter().map(|&index| self.palette.color(index))
    }

    /// Expand up to `rows` scanlines starting at `first_row` into `out`
    /// as big-endian RGB565
    ///
    /// Stops early at the end of the frame or when `out` is full.
    /// Returns the number of bytes written.
    pub fn expand_rows(&self, first_row: usize, rows: usize, out: &mut [u8]) -> usize {
        let last_row = first_row.saturating_add(rows).min(self.height);
        if first_row >= last_row {
            return 0;
        }

        let cells = &self.cells[first_row * self.width..last_row * self.width];
        let mut written = 0;
        for (&index, dst) in cells.iter().zip(out.chunks_exact_mut(2)) {
            dst.copy_from_slice(&self.palette.color(index).to_be_bytes());
            written += 2;
        }
        written
    }
}

/// When a brightness change reaches the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BrightnessMode {
    /// Applied as soon as it is requested (PWM or a backlight line)
    Immediate,
    /// Held until the current frame has been sent
    Deferred,
}

/// Panel adapter driven by [`crate::Display`]
pub trait Transport {
    /// Error type for bus or pin failures
    type Error;

    /// Reset the panel and run its init sequence
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Toggle the hardware reset line
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Program the controller's address window
    fn set_window(&mut self, window: Window) -> Result<(), Self::Error>;

    /// Stream every pixel of `frame` into the current window
    fn send_frame(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;

    /// Push a brightness level (0-100) to the panel
    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Whether brightness changes wait for the next frame
    fn brightness_mode(&self) -> BrightnessMode {
        BrightnessMode::Immediate
    }
}
