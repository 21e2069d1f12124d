//! DMA channels
//!
//! Only one shape of transfer is needed: a byte buffer pushed into a
//! peripheral FIFO, paced by that peripheral's DREQ.

/// Memory-to-peripheral DMA channel
///
/// The channel owns its destination; `start` only supplies the source.
pub trait DmaChannel {
    /// Error type for DMA operations
    type Error;

    /// Start copying `data` to the peripheral
    ///
    /// Returns immediately. `data` must not be modified until
    /// [`DmaChannel::is_busy`] reports `false`.
    fn start(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Whether the last transfer is still in flight
    fn is_busy(&self) -> bool;

    /// Spin until the last transfer has finished
    fn wait(&self) {
        while self.is_busy() {
            core::hint::spin_loop();
        }
    }
}
