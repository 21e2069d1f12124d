//! SPI panel bus with a data/command line
//!
//! The D/C line is low while a command byte is on the wire and high for
//! parameters and pixels.

use picoframe_hal::{BusError, OutputPin, PanelBus, SpiBus};

/// SPI + D/C + chip-select panel bus
pub struct SpiPanelBus<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS> SpiPanelBus<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Wrap the peripheral and idle both lines high
    pub fn new(spi: SPI, mut dc: DC, mut cs: CS) -> Self {
        cs.set_high();
        dc.set_high();
        Self { spi, dc, cs }
    }

    /// Return the peripheral and pins
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }
}

impl<SPI, DC, CS> PanelBus for SpiPanelBus<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Error = BusError<SPI::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low();
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        let flushed = self.spi.flush().map_err(BusError::Transfer);
        self.cs.set_high();
        flushed
    }

    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        self.dc.set_low();
        self.spi.write(&[cmd]).map_err(BusError::Transfer)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high();
        self.spi.write(data).map_err(BusError::Transfer)
    }

    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(BusError::Transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Log, MockBusError, MockSpi, Op};

    fn bus(log: &Log) -> SpiPanelBus<MockSpi, crate::mock::MockPin, crate::mock::MockPin> {
        SpiPanelBus::new(
            MockSpi {
                log: log.clone(),
                fail: false,
            },
            log.pin("dc"),
            log.pin("cs"),
        )
    }

    #[test]
    fn test_command_framing() {
        let log = Log::new();
        let mut bus = bus(&log);
        log.take();

        bus.command(0x2A, &[0x00, 0x00, 0x00, 0xEF]).unwrap();
        assert_eq!(
            log.take(),
            [
                Op::Pin("cs", false),
                Op::Pin("dc", false),
                Op::Spi(vec![0x2A]),
                Op::Pin("dc", true),
                Op::Spi(vec![0x00, 0x00, 0x00, 0xEF]),
                Op::Flush,
                Op::Pin("cs", true),
            ]
        );
    }

    #[test]
    fn test_command_without_params() {
        let log = Log::new();
        let mut bus = bus(&log);
        log.take();

        bus.command(0x29, &[]).unwrap();
        let ops = log.take();
        assert!(!ops.iter().any(|op| *op == Op::Pin("dc", true)));
        assert!(ops.contains(&Op::Spi(vec![0x29])));
    }

    #[test]
    fn test_transfer_error() {
        let log = Log::new();
        let mut bus = SpiPanelBus::new(
            MockSpi {
                log: log.clone(),
                fail: true,
            },
            log.pin("dc"),
            log.pin("cs"),
        );

        assert_eq!(
            bus.write_command(0x11),
            Err(BusError::Transfer(MockBusError))
        );
    }

    #[test]
    fn test_failed_command_releases_cs() {
        let log = Log::new();
        let mut bus = SpiPanelBus::new(
            MockSpi {
                log: log.clone(),
                fail: true,
            },
            log.pin("dc"),
            log.pin("cs"),
        );
        log.take();

        assert_eq!(
            bus.command(0x2A, &[0x00, 0xEF]),
            Err(BusError::Transfer(MockBusError))
        );
        assert_eq!(
            log.take(),
            [
                Op::Pin("cs", false),
                Op::Pin("dc", false),
                Op::Flush,
                Op::Pin("cs", true),
            ]
        );
    }
}
