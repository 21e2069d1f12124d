//! Blocking SPI

use embassy_rp::spi::{self, Blocking, Instance, Spi};
use picoframe_hal::spi::{Phase, Polarity, SpiConfig};
use picoframe_hal::SpiBus;

/// Translate a bus configuration into embassy-rp's
pub fn to_embassy_config(config: &SpiConfig) -> spi::Config {
    let (polarity, phase): (Polarity, Phase) = config.mode.into();

    let mut out = spi::Config::default();
    out.frequency = config.frequency;
    out.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    out.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    out
}

/// Write-only blocking SPI master
pub struct RpSpi<'d, T: Instance>(Spi<'d, T, Blocking>);

impl<'d, T: Instance> RpSpi<'d, T> {
    pub fn new(spi: Spi<'d, T, Blocking>) -> Self {
        Self(spi)
    }

    /// Change clock rate and mode between transactions
    pub fn reconfigure(&mut self, config: &SpiConfig) {
        self.0.set_config(&to_embassy_config(config));
    }

    pub fn into_inner(self) -> Spi<'d, T, Blocking> {
        self.0
    }
}

impl<T: Instance> SpiBus for RpSpi<'_, T> {
    type Error = spi::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), spi::Error> {
        self.0.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), spi::Error> {
        self.0.flush()
    }
}
