//! RP2040/RP2350 backend for the picoframe panel drivers
//!
//! Implements the `picoframe-hal` capability traits on top of
//! `embassy-rp`:
//!
//! - [`gpio::RpOutput`] - SIO output lines (CS, D/C, reset, power)
//! - [`spi::RpSpi`] - Blocking SPI for the D/C panels
//! - [`pio::PioSerializer`] - One-bit PIO shifter for the PicoGo LCD
//! - [`board`] - Pin maps of the supported boards
//!
//! PWM backlights use `embassy_rp::pwm::PwmOutput` directly; it already
//! implements `embedded_hal::pwm::SetDutyCycle`.

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod gpio;
pub mod pio;
pub mod spi;

pub use board::{Board, BoardPins, LcdBus, PinError};
pub use gpio::RpOutput;
pub use pio::PioSerializer;
pub use spi::RpSpi;
