#![no_std]
#![no_main]

use arduino_hal::hal::port::{mode::Output, Pin};
use arduino_hal::prelude::*;
use custom_leds::{CustomLeds, Pull, SetPull};
use panic_halt as _;

const NUM_DIGITS: u8 = 4;

// AVR outputs have no pull resistors, so there is nothing to configure.
struct UnoPin(Pin<Output>);

impl embedded_hal::digital::ErrorType for UnoPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for UnoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high();
        Ok(())
    }
}

impl SetPull for UnoPin {
    fn set_pull(&mut self, _pull: Pull) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);

    let clk = UnoPin(pins.d9.into_output().downgrade());
    let enable = UnoPin(pins.d8.into_output().downgrade());

    let mut display =
        CustomLeds::new(clk, enable, arduino_hal::Delay::new()).with_digit_count(NUM_DIGITS);
    display.init().unwrap();

    ufmt::uwriteln!(&mut serial, "Cycling digits...").unwrap_infallible();
    for digit in 0..10 {
        for position in 0..NUM_DIGITS {
            display.show_digit(position, digit, position == 1).unwrap();
        }
        arduino_hal::delay_ms(300);
    }

    ufmt::uwriteln!(&mut serial, "Blinking...").unwrap_infallible();
    for _ in 0..3 {
        display.disable().unwrap();
        arduino_hal::delay_ms(200);
        display.enable().unwrap();
        arduino_hal::delay_ms(200);
    }

    ufmt::uwriteln!(&mut serial, "Counting up...").unwrap_infallible();
    let mut i: u16 = 0;
    loop {
        display.show_number(i).unwrap();
        i = (i + 1) % 10000;

        arduino_hal::delay_ms(300);
    }
}
