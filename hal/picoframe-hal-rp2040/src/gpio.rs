//! GPIO output lines

use embassy_rp::gpio::{Level, Output, Pin};
use embassy_rp::Peri;
use picoframe_hal::OutputPin;

/// SIO output driving a panel control line
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    /// Take `pin` as an output at `initial`
    pub fn new(pin: Peri<'d, impl Pin>, initial: bool) -> Self {
        Self(Output::new(pin, Level::from(initial)))
    }

    pub fn into_inner(self) -> Output<'d> {
        self.0
    }
}

impl<'d> From<Output<'d>> for RpOutput<'d> {
    fn from(output: Output<'d>) -> Self {
        Self(output)
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}
