//! Indexed-color framebuffer and display core for picoframe
//!
//! This crate provides:
//! - `Framebuffer`: one RGB332 palette index per pixel, with clipped
//!   drawing primitives (lines, rectangles, circles, triangles, blits)
//! - `Palette`: the fixed RGB332 → RGB565 expansion table
//! - Bitmap fonts in five sizes and a text renderer
//! - `Transport`: the boundary a panel adapter implements
//! - `Display`: a framebuffer plus a transport, with `swap` as the only
//!   operation that touches the bus
//!
//! # Architecture
//!
//! Drawing is CPU-only and never fails; invalid input is clipped or
//! ignored. Colors come in as RGB565 and are quantized once on the way
//! into the framebuffer. On `swap`, the transport receives the indices
//! and the palette and decides how to expand and stream them for its bus.
//!
//! Panel adapters for specific controllers live in `picoframe-drivers`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod display;
pub mod font;
pub mod framebuffer;
pub mod palette;
pub mod transport;

mod raster;
mod text;

// Re-export key types
pub use color::{rgb565_to_rgb332, Rgb565};
pub use config::{DisplayConfig, MAX_BRIGHTNESS};
pub use display::{Display, DisplayError};
pub use font::{FontSize, FontTable};
pub use framebuffer::{FrameStorage, Framebuffer};
pub use palette::{build_palette, Palette, PALETTE_SIZE};
pub use raster::MAX_RADIUS;
pub use transport::{BrightnessMode, Frame, Transport, Window};
