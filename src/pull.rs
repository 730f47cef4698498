//! Pull resistor configuration.
//!
//! `embedded-hal` has no trait for changing the pull of an output pin, so the
//! driver asks for this one. Board crates usually implement it with a single
//! register write; pins without configurable pulls can implement it as a no-op.

use embedded_hal::digital::ErrorType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

pub trait SetPull: ErrorType {
    fn set_pull(&mut self, pull: Pull) -> Result<(), Self::Error>;
}

impl<T: SetPull + ?Sized> SetPull for &mut T {
    fn set_pull(&mut self, pull: Pull) -> Result<(), Self::Error> {
        T::set_pull(self, pull)
    }
}
