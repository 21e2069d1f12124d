//! Recording mocks for bus and panel tests
//!
//! Every mock appends to one shared log so tests can assert the exact
//! interleaving of pin changes, bus bytes and delays.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use picoframe_hal::{DmaChannel, OutputPin, QuadSpi, SerialOut, SpiBus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Pin(&'static str, bool),
    Spi(Vec<u8>),
    Flush,
    Put(u8),
    Idle,
    Single(Vec<u8>),
    Quad(Vec<u8>),
    Drain,
    Dma(Vec<u8>),
    DelayMs(u32),
    DelayNs(u32),
    Duty(u16),
}

#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Op>>>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, op: Op) {
        self.0.borrow_mut().push(op);
    }

    pub fn take(&self) -> Vec<Op> {
        core::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn ops(&self) -> Vec<Op> {
        self.0.borrow().clone()
    }

    pub fn pin(&self, name: &'static str) -> MockPin {
        MockPin {
            name,
            high: false,
            log: self.clone(),
        }
    }
}

pub struct MockPin {
    name: &'static str,
    high: bool,
    log: Log,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
        self.log.push(Op::Pin(self.name, true));
    }

    fn set_low(&mut self) {
        self.high = false;
        self.log.push(Op::Pin(self.name, false));
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

pub struct MockDelay(pub Log);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Op::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Op::DelayMs(ms));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

pub struct MockSpi {
    pub log: Log,
    pub fail: bool,
}

impl SpiBus for MockSpi {
    type Error = MockBusError;

    fn write(&mut self, data: &[u8]) -> Result<(), MockBusError> {
        if self.fail {
            return Err(MockBusError);
        }
        self.log.push(Op::Spi(data.to_vec()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), MockBusError> {
        self.log.push(Op::Flush);
        Ok(())
    }
}

pub struct MockSerial(pub Log);

impl SerialOut for MockSerial {
    fn put(&mut self, byte: u8) {
        self.0.push(Op::Put(byte));
    }

    fn wait_idle(&mut self) {
        self.0.push(Op::Idle);
    }
}

pub struct MockQspi(pub Log);

impl QuadSpi for MockQspi {
    type Error = MockBusError;

    fn write_single(&mut self, data: &[u8]) -> Result<(), MockBusError> {
        self.0.push(Op::Single(data.to_vec()));
        Ok(())
    }

    fn write_quad(&mut self, data: &[u8]) -> Result<(), MockBusError> {
        self.0.push(Op::Quad(data.to_vec()));
        Ok(())
    }

    fn drain(&mut self) -> Result<(), MockBusError> {
        self.0.push(Op::Drain);
        Ok(())
    }
}

/// QSPI whose register writes go through but whose quad writes and
/// drains fail
pub struct FailingQspi(pub Log);

impl QuadSpi for FailingQspi {
    type Error = MockBusError;

    fn write_single(&mut self, data: &[u8]) -> Result<(), MockBusError> {
        self.0.push(Op::Single(data.to_vec()));
        Ok(())
    }

    fn write_quad(&mut self, _data: &[u8]) -> Result<(), MockBusError> {
        Err(MockBusError)
    }

    fn drain(&mut self) -> Result<(), MockBusError> {
        self.0.push(Op::Drain);
        Err(MockBusError)
    }
}

/// DMA channel that reports busy for `polls` checks after each start
pub struct MockDma {
    pub log: Log,
    pub polls: u32,
    remaining: Cell<u32>,
}

impl MockDma {
    pub fn new(log: Log, polls: u32) -> Self {
        Self {
            log,
            polls,
            remaining: Cell::new(0),
        }
    }
}

impl DmaChannel for MockDma {
    type Error = MockBusError;

    fn start(&mut self, data: &[u8]) -> Result<(), MockBusError> {
        if self.remaining.get() > 0 {
            return Err(MockBusError);
        }
        self.log.push(Op::Dma(data.to_vec()));
        self.remaining.set(self.polls);
        Ok(())
    }

    fn is_busy(&self) -> bool {
        let left = self.remaining.get();
        if left > 0 {
            self.remaining.set(left - 1);
        }
        left > 0
    }
}

pub struct MockPwm(pub Log);

impl ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        100
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.0.push(Op::Duty(duty));
        Ok(())
    }
}
