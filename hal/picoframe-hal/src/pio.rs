//! PIO serializer
//!
//! A PIO state machine running a one-bit shift program turns bytes into a
//! clock and data line. Nothing else about the PIO is exposed.

/// Byte-wide serial output driven by a PIO state machine
pub trait SerialOut {
    /// Queue one byte, blocking while the TX FIFO is full
    fn put(&mut self, byte: u8);

    /// Block until the FIFO is empty and the last bit has been shifted
    /// out
    fn wait_idle(&mut self);

    /// Queue every byte of `data`
    fn put_all(&mut self, data: &[u8]) {
        for &byte in data {
            self.put(byte);
        }
    }
}
