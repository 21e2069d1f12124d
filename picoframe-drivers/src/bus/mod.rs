//! Panel bus adapters
//!
//! Each adapter turns a raw peripheral from `picoframe-hal` into a
//! [`picoframe_hal::PanelBus`]:
//!
//! - [`SpiPanelBus`] - SPI with a data/command line
//! - [`PioPanelBus`] - PIO serializer with data/command and chip-select lines
//! - [`QspiPanelBus`] - QSPI with framed commands and optional DMA

pub mod pio;
pub mod qspi;
pub mod spi;

pub use pio::PioPanelBus;
pub use qspi::{NoDma, QspiPanelBus};
pub use spi::SpiPanelBus;

/// Memory write command shared by every supported controller
pub const RAMWR: u8 = 0x2C;
