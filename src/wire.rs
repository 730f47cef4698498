//! Pulse encoding on the timing pin.
//!
//! There is no separate data line: every bit is one high/low pulse of fixed
//! length, and the module tells a 0 from a 1 by where the falling edge lands.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::constants::timing::*;

pub(crate) struct Wire<CLK, D> {
    pub(crate) clk: CLK,
    pub(crate) delay: D,
}

impl<CLK, D> Wire<CLK, D> {
    pub(crate) fn new(clk: CLK, delay: D) -> Self {
        Self { clk, delay }
    }
}

impl<CLK, D, E> Wire<CLK, D>
where
    CLK: OutputPin<Error = E>,
    D: DelayNs,
{
    /// Emits a single pulse. Runs with interrupts masked; the guard returned
    /// by `critical_section::with` restores them on every exit path.
    pub(crate) fn send_bit(&mut self, bit: bool) -> Result<(), E> {
        let (high_us, low_us) = if bit {
            (ONE_HIGH_US, ONE_LOW_US)
        } else {
            (ZERO_HIGH_US, ZERO_LOW_US)
        };

        let Self { clk, delay } = self;
        critical_section::with(|_| -> Result<(), E> {
            clk.set_high()?;
            delay.delay_us(high_us);
            clk.set_low()?;
            delay.delay_us(low_us);
            Ok(())
        })
    }

    /// Sends the 8 bits of `pattern`, bit 0 first.
    pub(crate) fn send_pattern(&mut self, pattern: u8) -> Result<(), E> {
        for i in 0..8 {
            self.send_bit((pattern >> i) & 1 == 1)?;
            self.delay.delay_us(BIT_GUARD_US);
        }
        self.delay.delay_us(DIGIT_GUARD_US);
        Ok(())
    }

    /// Clocks out a run of zero bits to flush the module's shift state.
    pub(crate) fn prime(&mut self) -> Result<(), E> {
        for _ in 0..PRIME_BITS {
            self.send_bit(false)?;
            self.delay.delay_us(BIT_GUARD_US);
        }
        Ok(())
    }
}
