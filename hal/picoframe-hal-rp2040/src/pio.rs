//! PIO one-bit serializer
//!
//! The PicoGo LCD is clocked by a two-instruction PIO program instead of
//! the SPI block: each byte pushed into the TX FIFO is shifted out MSB
//! first on the data pin, with the clock on side-set.
//!
//! ```text
//!   out pins, 1   side 0   ; data bit, clock low
//!   nop           side 1   ; clock high, panel samples
//! ```
//!
//! Command/data and chip-select are ordinary GPIOs driven by the panel
//! bus, which must know when the last bit has left the shifter. The
//! state machine stalls on an empty FIFO, so a fresh TX-stall flag after
//! the FIFO drains means the shifter is idle.

use embassy_rp::pio::{Common, Config, Direction, FifoJoin, Instance, PioPin, ShiftDirection, StateMachine};
use embassy_rp::Peri;
use fixed::types::U24F8;
use picoframe_hal::SerialOut;

/// System clock after embassy-rp's default clock setup
#[cfg(not(feature = "rp235xa"))]
pub const SYS_CLK_HZ: u32 = 125_000_000;
#[cfg(feature = "rp235xa")]
pub const SYS_CLK_HZ: u32 = 150_000_000;

/// PIO instructions per output bit
pub const CYCLES_PER_BIT: u32 = 2;

/// Clock divider for a target bit rate, as (integer, 1/256ths)
///
/// The divider is 16.8 fixed point. Rates above `sys_clk_hz / 2` clamp to
/// a divider of 1; a zero rate gives the largest divider.
pub fn calc_clock_divider(sys_clk_hz: u32, bit_rate_hz: u32) -> (u16, u8) {
    if bit_rate_hz == 0 {
        return (0xFFFF, 0xFF);
    }

    let divisor = u64::from(bit_rate_hz) * u64::from(CYCLES_PER_BIT);
    let divider_x256 = (u64::from(sys_clk_hz) * 256) / divisor;

    let int_part = (divider_x256 / 256).clamp(1, 0xFFFF) as u16;
    let frac_part = if int_part == 1 && divider_x256 < 256 {
        0
    } else {
        (divider_x256 % 256) as u8
    };
    (int_part, frac_part)
}

/// Divider in the form embassy-rp's `Config::clock_divider` takes
pub fn clock_divider(sys_clk_hz: u32, bit_rate_hz: u32) -> U24F8 {
    let (int_part, frac_part) = calc_clock_divider(sys_clk_hz, bit_rate_hz);
    U24F8::from_bits((u32::from(int_part) << 8) | u32::from(frac_part))
}

/// Bit rate actually produced by a divider
pub fn bit_rate(sys_clk_hz: u32, (int_part, frac_part): (u16, u8)) -> u32 {
    let divider_x256 = (u64::from(int_part) << 8) | u64::from(frac_part);
    if divider_x256 == 0 {
        return 0;
    }
    ((u64::from(sys_clk_hz) * 256) / (divider_x256 * u64::from(CYCLES_PER_BIT))) as u32
}

/// Byte serializer on one PIO state machine
pub struct PioSerializer<'d, PIO: Instance, const SM: usize> {
    sm: StateMachine<'d, PIO, SM>,
}

impl<'d, PIO: Instance, const SM: usize> PioSerializer<'d, PIO, SM> {
    /// Load the shifter program and start `sm`
    ///
    /// `divider` comes from [`clock_divider`]; the PicoGo runs at 1.0.
    pub fn new(
        common: &mut Common<'d, PIO>,
        mut sm: StateMachine<'d, PIO, SM>,
        data_pin: Peri<'d, impl PioPin>,
        clock_pin: Peri<'d, impl PioPin>,
        divider: U24F8,
    ) -> Self {
        let prg = pio::pio_asm!(
            ".side_set 1",
            ".wrap_target",
            "out pins, 1 side 0",
            "nop side 1",
            ".wrap"
        );
        let installed = common.load_program(&prg.program);

        let data = common.make_pio_pin(data_pin);
        let clock = common.make_pio_pin(clock_pin);

        let mut cfg = Config::default();
        cfg.use_program(&installed, &[&clock]);
        cfg.set_out_pins(&[&data]);
        cfg.shift_out.direction = ShiftDirection::Left;
        cfg.shift_out.threshold = 8;
        cfg.shift_out.auto_fill = true;
        cfg.fifo_join = FifoJoin::TxOnly;
        cfg.clock_divider = divider;

        sm.set_config(&cfg);
        sm.set_pin_dirs(Direction::Out, &[&data, &clock]);
        sm.set_enable(true);

        #[cfg(feature = "defmt")]
        defmt::debug!("pio serializer: sm{} up, divider {=u32:#x}", SM, divider.to_bits());

        Self { sm }
    }
}

impl<PIO: Instance, const SM: usize> SerialOut for PioSerializer<'_, PIO, SM> {
    fn put(&mut self, byte: u8) {
        // left shift pulls from bit 31
        while !self.sm.tx().try_push(u32::from(byte) << 24) {
            core::hint::spin_loop();
        }
    }

    fn wait_idle(&mut self) {
        let tx = self.sm.tx();
        while !tx.empty() {
            core::hint::spin_loop();
        }
        // clear, then wait for the shifter to stall again
        let _ = tx.stalled();
        while !tx.stalled() {
            core::hint::spin_loop();
        }
    }
}
