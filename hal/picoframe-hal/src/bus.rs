//! Panel command/data bus
//!
//! Every supported controller speaks the same shape of protocol: assert
//! chip-select, send a command byte, send zero or more parameter or pixel
//! bytes, release chip-select. How the command is marked differs per bus
//! (a D/C line, or a framed header on QSPI) and is hidden behind
//! [`PanelBus`].

/// Command/data byte channel to a display controller
pub trait PanelBus {
    /// Error type for bus failures
    type Error;

    /// Assert chip-select and open a transaction
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Release chip-select once all queued bytes are out
    fn deselect(&mut self) -> Result<(), Self::Error>;

    /// Send a command byte
    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error>;

    /// Send parameter or pixel bytes for the last command
    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until the bus has finished shifting
    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Close a transaction whose body produced `body`
    ///
    /// Chip-select is released even when the body failed. The body's
    /// error then wins over one from the release.
    fn end_transaction(&mut self, body: Result<(), Self::Error>) -> Result<(), Self::Error> {
        match body {
            Ok(()) => self.deselect(),
            Err(e) => {
                let _ = self.deselect();
                Err(e)
            }
        }
    }

    /// Send a command and its parameters as one transaction
    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error> {
        self.select()?;
        let sent = match self.write_command(cmd) {
            Ok(()) if !params.is_empty() => self.write_data(params),
            other => other,
        };
        self.end_transaction(sent)
    }
}

/// Panel bus that can stream pixel data by DMA
pub trait DmaPanelBus: PanelBus {
    /// Start streaming `data` as pixel bytes for the current command
    ///
    /// Only valid inside a transaction opened for a memory write.
    fn start_dma(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Whether the last DMA transfer is still running
    fn dma_is_busy(&self) -> bool;
}

/// Panel bus errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E, D = core::convert::Infallible> {
    /// The underlying SPI/QSPI peripheral failed
    Transfer(E),
    /// The DMA channel refused a transfer
    Dma(D),
    /// DMA was requested outside a memory-write transaction
    NotStreaming,
}
