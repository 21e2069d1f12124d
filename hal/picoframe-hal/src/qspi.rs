//! Quad SPI
//!
//! AMOLED controllers on the larger boards take commands on a single data
//! line and pixel data on all four. The transport switches lane width
//! inside one chip-select session.

/// Quad SPI master with switchable lane width
pub trait QuadSpi {
    /// Error type for QSPI operations
    type Error;

    /// Send bytes on D0 only
    fn write_single(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Send bytes on D0..D3, four bits per clock
    fn write_quad(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until every queued bit has been clocked out
    fn drain(&mut self) -> Result<(), Self::Error>;
}
