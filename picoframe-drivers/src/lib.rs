//! Panel drivers
//!
//! Concrete [`picoframe_display::Transport`] implementations for the
//! supported boards, built on the capability traits in `picoframe-hal`:
//!
//! - Bus adapters (SPI + D/C, PIO serializer, QSPI with optional DMA)
//! - Controllers (GC9A01, ST7789, CO5300, SH8601)
//! - Frame streaming (per pixel, chunked, chunked by DMA)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod panel;
pub mod stream;

#[cfg(test)]
mod mock;

pub use panel::{Co5300, Gc9a01, Orientation, PanelConfig, PanelError, Sh8601, St7789};
