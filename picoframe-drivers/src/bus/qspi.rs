//! QSPI panel bus
//!
//! There is no D/C line. Each transaction starts with a four-byte header
//! on D0: `0x02 0x00 cmd 0x00` for register writes, or
//! `0x32 0x00 0x2C 0x00` to open a memory write whose pixel bytes then
//! follow on all four lanes.

use heapless::Vec;
use picoframe_hal::{BusError, DmaChannel, DmaPanelBus, OutputPin, PanelBus, QuadSpi};

use super::RAMWR;

/// Opcode for a single-lane register write
const OP_WRITE_REGISTER: u8 = 0x02;
/// Opcode for a quad-lane pixel write
const OP_WRITE_PIXELS: u8 = 0x32;

/// Longest register write sent as a single burst
const MAX_BURST: usize = 40;

const fn header(op: u8, cmd: u8) -> [u8; 4] {
    [op, 0x00, cmd, 0x00]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Register,
    Pixels,
}

/// Placeholder DMA channel for buses that only stream by CPU
///
/// Every transfer is refused.
#[derive(Debug, Default)]
pub struct NoDma;

/// Error returned by [`NoDma`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaUnavailable;

impl DmaChannel for NoDma {
    type Error = DmaUnavailable;

    fn start(&mut self, _data: &[u8]) -> Result<(), DmaUnavailable> {
        Err(DmaUnavailable)
    }

    fn is_busy(&self) -> bool {
        false
    }
}

/// QSPI + chip-select panel bus
pub struct QspiPanelBus<Q, CS, DMA = NoDma> {
    qspi: Q,
    cs: CS,
    dma: DMA,
    phase: Phase,
}

impl<Q, CS> QspiPanelBus<Q, CS, NoDma>
where
    Q: QuadSpi,
    CS: OutputPin,
{
    /// Bus without DMA; pixels are written by the CPU
    pub fn new(qspi: Q, cs: CS) -> Self {
        Self::with_dma(qspi, cs, NoDma)
    }
}

impl<Q, CS, DMA> QspiPanelBus<Q, CS, DMA>
where
    Q: QuadSpi,
    CS: OutputPin,
    DMA: DmaChannel,
{
    /// Bus that can hand pixel chunks to `dma`
    pub fn with_dma(qspi: Q, mut cs: CS, dma: DMA) -> Self {
        cs.set_high();
        Self {
            qspi,
            cs,
            dma,
            phase: Phase::Idle,
        }
    }

    pub fn release(self) -> (Q, CS, DMA) {
        (self.qspi, self.cs, self.dma)
    }
}

impl<Q, CS, DMA> PanelBus for QspiPanelBus<Q, CS, DMA>
where
    Q: QuadSpi,
    CS: OutputPin,
    DMA: DmaChannel,
{
    type Error = BusError<Q::Error, DMA::Error>;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low();
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.dma.wait();
        let drained = self.qspi.drain().map_err(BusError::Transfer);
        self.cs.set_high();
        self.phase = Phase::Idle;
        drained
    }

    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        let (op, phase) = if cmd == RAMWR {
            (OP_WRITE_PIXELS, Phase::Pixels)
        } else {
            (OP_WRITE_REGISTER, Phase::Register)
        };
        self.qspi
            .write_single(&header(op, cmd))
            .map_err(BusError::Transfer)?;
        self.phase = phase;
        Ok(())
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let sent = match self.phase {
            Phase::Pixels => self.qspi.write_quad(data),
            Phase::Register | Phase::Idle => self.qspi.write_single(data),
        };
        sent.map_err(BusError::Transfer)
    }

    fn wait_idle(&mut self) -> Result<(), Self::Error> {
        self.dma.wait();
        self.qspi.drain().map_err(BusError::Transfer)
    }

    /// Header and parameters go out as one burst when they fit
    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Self::Error> {
        let mut burst: Vec<u8, MAX_BURST> = Vec::new();
        let framed = cmd != RAMWR
            && burst.extend_from_slice(&header(OP_WRITE_REGISTER, cmd)).is_ok()
            && burst.extend_from_slice(params).is_ok();

        self.select()?;
        let sent = if framed {
            let sent = self.qspi.write_single(&burst).map_err(BusError::Transfer);
            if sent.is_ok() {
                self.phase = Phase::Register;
            }
            sent
        } else {
            self.write_command(cmd).and_then(|()| self.write_data(params))
        };
        self.end_transaction(sent)
    }
}

impl<Q, CS, DMA> DmaPanelBus for QspiPanelBus<Q, CS, DMA>
where
    Q: QuadSpi,
    CS: OutputPin,
    DMA: DmaChannel,
{
    fn start_dma(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.phase != Phase::Pixels {
            return Err(BusError::NotStreaming);
        }
        self.dma.start(data).map_err(BusError::Dma)
    }

    fn dma_is_busy(&self) -> bool {
        self.dma.is_busy()
    }
}
