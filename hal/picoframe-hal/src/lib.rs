//! picoframe Hardware Abstraction Layer
//!
//! Capability traits for the peripherals a display panel hangs off.
//! Chip-specific crates implement the low-level ones; the panel buses in
//! `picoframe-drivers` are built on top of them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  picoframe-display (Display, Transport) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picoframe-drivers (panels, buses)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picoframe-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ picoframe-hal-rp2040│
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Chip-select, D/C, reset, backlight and power lines
//! - [`spi::SpiBus`] - Write-only SPI master
//! - [`pio::SerialOut`] - Byte-wide PIO serializer
//! - [`qspi::QuadSpi`] - Single-lane commands plus quad-lane data
//! - [`dma::DmaChannel`] - One-shot memory-to-peripheral transfers
//! - [`bus::PanelBus`], [`bus::DmaPanelBus`] - Command/data channel to a panel

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod dma;
pub mod gpio;
pub mod pio;
pub mod qspi;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use bus::{BusError, DmaPanelBus, PanelBus};
pub use dma::DmaChannel;
pub use gpio::OutputPin;
pub use pio::SerialOut;
pub use qspi::QuadSpi;
pub use spi::SpiBus;
