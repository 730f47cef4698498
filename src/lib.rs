#![no_std]

//! Driver for 4-digit seven-segment LED modules that take their data as
//! timed pulses on a single line, with a second line gating the display.
//!
//! ```rust,ignore
//! let mut display = CustomLeds::new(clk, enable, delay).with_digit_count(4);
//! display.init()?;
//! display.show_number(1234)?;
//! display.show_digit(1, 2, true)?; // "12.34"
//! ```

mod constants;
mod pull;
mod wire;

pub use constants::*;
pub use pull::{Pull, SetPull};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use num_traits::ToPrimitive;
use wire::Wire;

pub struct CustomLeds<CLK, EN, D> {
    wire: Wire<CLK, D>,
    enable: EN,
    digit_count: u8,
    brightness: u8,
    lit_brightness: u8, // restored by enable()
    buffer: [u8; MAX_DIGITS as usize],
}

impl<CLK, EN, D> CustomLeds<CLK, EN, D> {
    /// Creates a driver for a 4-digit module. No pin is touched until `init`.
    pub fn new(clk: CLK, enable: EN, delay: D) -> Self {
        Self {
            wire: Wire::new(clk, delay),
            enable,
            digit_count: MAX_DIGITS,
            brightness: 0, // dark until init drives the enable line
            lit_brightness: DEFAULT_BRIGHTNESS,
            buffer: [BLANK; MAX_DIGITS as usize],
        }
    }

    /// Sets how many digits are wired, clamped to `1..=MAX_DIGITS`.
    pub fn with_digit_count(mut self, count: u8) -> Self {
        self.digit_count = count.clamp(1, MAX_DIGITS);
        self
    }

    pub fn destroy(self) -> (CLK, EN, D) {
        (self.wire.clk, self.enable, self.wire.delay)
    }

    pub fn digit_count(&self) -> u8 {
        self.digit_count
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Whether the enable line was last driven high. False before `init`.
    pub fn is_enabled(&self) -> bool {
        self.brightness > 0
    }

    /// Last pattern sent to each position. The module has no read-back, so
    /// this is a shadow copy.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer[..self.digit_count as usize]
    }
}

impl<CLK, EN, D, E> CustomLeds<CLK, EN, D>
where
    CLK: OutputPin<Error = E> + SetPull,
    EN: OutputPin<Error = E> + SetPull,
    D: DelayNs,
{
    /// Configures both pins, enables the module, flushes its shift state and
    /// blanks every digit. Calling it again re-primes the module.
    pub fn init(&mut self) -> Result<(), CustomLedsError<E>> {
        self.wire.clk.set_pull(Pull::None)?;
        self.enable.set_pull(Pull::None)?;
        self.wire.clk.set_low()?;
        self.enable.set_high()?;
        self.brightness = self.lit_brightness;

        #[cfg(feature = "defmt")]
        defmt::debug!("priming {=usize} bits", timing::PRIME_BITS);

        self.wire.prime()?;
        self.clear()
    }

    pub fn clear(&mut self) -> Result<(), CustomLedsError<E>> {
        for i in 0..self.digit_count as usize {
            self.wire.send_pattern(SEGMENTS[BLANK_INDEX])?;
            self.buffer[i] = BLANK;
        }
        Ok(())
    }

    /// Shows `digit` at `position`. Both wrap instead of failing: the position
    /// modulo the digit count, the digit modulo 10.
    pub fn show_digit(
        &mut self,
        position: u8,
        digit: u8,
        decimal_point: bool,
    ) -> Result<(), CustomLedsError<E>> {
        let position = position % self.digit_count;
        let mut pattern = SEGMENTS[(digit % 10) as usize];
        if decimal_point {
            pattern |= DP_MASK;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("digit {=u8} <- {=u8:#x}", position, pattern);

        self.buffer[position as usize] = pattern;
        self.wire.send_pattern(pattern)?;
        Ok(())
    }

    /// Shows `number` as four decimal digits, most significant at position 0.
    /// Values outside `0..=MAX_VALUE` are clamped to the nearest bound.
    pub fn show_number<T>(&mut self, number: T) -> Result<(), CustomLedsError<E>>
    where
        T: ToPrimitive,
    {
        for (position, digit) in decimal_digits(clamp_value(number)).into_iter().enumerate() {
            self.show_digit(position as u8, digit, false)?;
        }
        Ok(())
    }

    /// Levels are clamped to `0..=MAX_BRIGHTNESS`. Zero turns the display off
    /// through the enable line; any other level turns it on. The module has no
    /// dimming, so levels 1-8 all look the same.
    pub fn set_brightness(&mut self, level: u8) -> Result<(), CustomLedsError<E>> {
        let level = level.min(MAX_BRIGHTNESS);
        if level == 0 {
            self.enable.set_low()?;
        } else {
            self.enable.set_high()?;
            self.lit_brightness = level;
        }
        self.brightness = level;

        #[cfg(feature = "defmt")]
        defmt::debug!("brightness {=u8}", level);

        Ok(())
    }

    /// Turns the display back on at the last non-zero brightness.
    pub fn enable(&mut self) -> Result<(), CustomLedsError<E>> {
        self.set_brightness(self.lit_brightness)
    }

    /// Turns the display off. Digit contents are kept.
    pub fn disable(&mut self) -> Result<(), CustomLedsError<E>> {
        self.set_brightness(0)
    }
}

fn clamp_value<T: ToPrimitive>(number: T) -> u16 {
    match number.to_i64() {
        Some(value) => value.clamp(0, MAX_VALUE as i64) as u16,
        // too large for i64, or NaN
        None => match number.to_f64() {
            Some(value) if value > 0.0 => MAX_VALUE,
            _ => 0,
        },
    }
}

fn decimal_digits(value: u16) -> [u8; 4] {
    [
        (value / 1000 % 10) as u8,
        (value / 100 % 10) as u8,
        (value / 10 % 10) as u8,
        (value % 10) as u8,
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CustomLedsError<E> {
    PinError(E),
}

impl<E> From<E> for CustomLedsError<E> {
    fn from(error: E) -> Self {
        CustomLedsError::PinError(error)
    }
}
