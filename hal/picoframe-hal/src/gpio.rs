//! GPIO output lines
//!
//! Panels need a handful of plain output lines next to their data bus:
//! chip-select, data/command select, reset, and on some boards a
//! backlight or power enable.

/// Digital output pin
///
/// Writes are assumed to be infallible, as on the RP2040 SIO block.
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently driven low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        T::set_high(self)
    }

    fn set_low(&mut self) {
        T::set_low(self)
    }

    fn is_set_high(&self) -> bool {
        T::is_set_high(self)
    }
}
