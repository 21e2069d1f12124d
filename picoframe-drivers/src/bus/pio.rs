//! PIO panel bus
//!
//! The serializer only shifts bits, so command/data selection and
//! chip-select are plain GPIO lines. Those lines must not move while the
//! state machine still has bits in flight: every change of D/C or CS
//! waits for the serializer to go idle first. Consecutive writes in the
//! same phase are not gated.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use picoframe_hal::{OutputPin, PanelBus, SerialOut};

/// Setup/hold time around D/C and CS changes
const LINE_SETTLE_US: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Command,
    Data,
}

/// PIO serializer + D/C + chip-select panel bus
pub struct PioPanelBus<SM, DC, CS, D> {
    sm: SM,
    dc: DC,
    cs: CS,
    delay: D,
    phase: Phase,
}

impl<SM, DC, CS, D> PioPanelBus<SM, DC, CS, D>
where
    SM: SerialOut,
    DC: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    pub fn new(sm: SM, mut dc: DC, mut cs: CS, delay: D) -> Self {
        cs.set_high();
        dc.set_high();
        Self {
            sm,
            dc,
            cs,
            delay,
            phase: Phase::Idle,
        }
    }

    pub fn release(self) -> (SM, DC, CS, D) {
        (self.sm, self.dc, self.cs, self.delay)
    }

    /// Move D/C and CS once the serializer has drained
    fn set_lines(&mut self, dc: bool, cs: bool) {
        self.sm.wait_idle();
        self.delay.delay_us(LINE_SETTLE_US);
        self.dc.set_state(dc);
        self.cs.set_state(cs);
        self.delay.delay_us(LINE_SETTLE_US);
    }
}

impl<SM, DC, CS, D> PanelBus for PioPanelBus<SM, DC, CS, D>
where
    SM: SerialOut,
    DC: OutputPin,
    CS: OutputPin,
    D: DelayNs,
{
    type Error = Infallible;

    fn select(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Infallible> {
        self.set_lines(true, true);
        self.phase = Phase::Idle;
        Ok(())
    }

    fn write_command(&mut self, cmd: u8) -> Result<(), Infallible> {
        if self.phase != Phase::Command {
            self.set_lines(false, false);
            self.phase = Phase::Command;
        }
        self.sm.put(cmd);
        Ok(())
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Infallible> {
        if self.phase != Phase::Data {
            self.set_lines(true, false);
            self.phase = Phase::Data;
        }
        self.sm.put_all(data);
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), Infallible> {
        self.sm.wait_idle();
        Ok(())
    }
}
