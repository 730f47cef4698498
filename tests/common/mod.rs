#![allow(dead_code)]

use std::cell::RefCell;
use std::iter::Peekable;
use std::rc::Rc;

use custom_leds::{Pull, SetPull};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Clk,
    Enable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Set(Line, bool),
    Pull(Line, Pull),
    Acquire,
    Release,
    /// Nanoseconds.
    Wait(u64),
}

pub type Timeline = Rc<RefCell<Vec<Event>>>;

std::thread_local! {
    // timeline of the mocks most recently built on this test's thread
    static CURRENT: RefCell<Option<Timeline>> = const { RefCell::new(None) };
}

fn record_window(event: Event) {
    CURRENT.with(|current| {
        if let Some(timeline) = current.borrow().as_ref() {
            timeline.borrow_mut().push(event);
        }
    });
}

/// Critical section that only marks its boundaries on the timeline.
struct RecordingCs;
critical_section::set_impl!(RecordingCs);

unsafe impl critical_section::Impl for RecordingCs {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        record_window(Event::Acquire);
    }

    unsafe fn release(_restore_state: critical_section::RawRestoreState) {
        record_window(Event::Release);
    }
}

pub struct MockPin {
    line: Line,
    timeline: Timeline,
    pub fail: bool,
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl MockPin {
    fn record(&mut self, event: Event) -> Result<(), ErrorKind> {
        if self.fail {
            return Err(ErrorKind::Other);
        }
        self.timeline.borrow_mut().push(event);
        Ok(())
    }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(Event::Set(self.line, false))
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(Event::Set(self.line, true))
    }
}

impl SetPull for MockPin {
    fn set_pull(&mut self, pull: Pull) -> Result<(), Self::Error> {
        self.record(Event::Pull(self.line, pull))
    }
}

pub struct MockDelay {
    timeline: Timeline,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.timeline.borrow_mut().push(Event::Wait(ns as u64));
    }

    fn delay_us(&mut self, us: u32) {
        self.timeline.borrow_mut().push(Event::Wait(us as u64 * 1_000));
    }
}

pub fn mocks() -> (MockPin, MockPin, MockDelay, Timeline) {
    let timeline = Timeline::default();
    CURRENT.with(|current| *current.borrow_mut() = Some(timeline.clone()));
    (
        MockPin {
            line: Line::Clk,
            timeline: timeline.clone(),
            fail: false,
        },
        MockPin {
            line: Line::Enable,
            timeline: timeline.clone(),
            fail: false,
        },
        MockDelay {
            timeline: timeline.clone(),
        },
        timeline,
    )
}

/// One pulse on the clock line, in microseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pulse {
    pub high_us: u64,
    /// Low time inside the critical section.
    pub hold_us: u64,
    /// Waits after the critical section, up to the next window.
    pub guard_us: u64,
}

impl Pulse {
    pub fn bit(&self) -> bool {
        match (self.high_us, self.hold_us) {
            (8, 4) => true,
            (4, 8) => false,
            _ => panic!("malformed pulse {:?}", self),
        }
    }
}

fn waits<'a>(iter: &mut Peekable<impl Iterator<Item = &'a Event>>) -> u64 {
    let mut total_ns = 0;
    while let Some(Event::Wait(ns)) = iter.peek() {
        total_ns += ns;
        iter.next();
    }
    total_ns / 1_000
}

/// Decodes every critical section on the timeline. Panics unless each one
/// holds exactly a rising edge, the high hold, a falling edge and the low hold.
pub fn pulses(timeline: &[Event]) -> Vec<Pulse> {
    let mut pulses = Vec::new();
    let mut iter = timeline.iter().peekable();
    while let Some(event) = iter.next() {
        assert_ne!(*event, Event::Set(Line::Clk, true), "clock edge outside a critical section");
        if *event != Event::Acquire {
            continue;
        }
        assert_eq!(iter.next(), Some(&Event::Set(Line::Clk, true)));
        let high_us = waits(&mut iter);
        assert_eq!(iter.next(), Some(&Event::Set(Line::Clk, false)));
        let hold_us = waits(&mut iter);
        assert_eq!(iter.next(), Some(&Event::Release));
        let guard_us = waits(&mut iter);
        pulses.push(Pulse {
            high_us,
            hold_us,
            guard_us,
        });
    }
    pulses
}

/// Regroups decoded bits into bytes, least significant bit first.
pub fn patterns(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &bit)| acc | (bit as u8) << i)
        })
        .collect()
}

pub fn bits(timeline: &Timeline) -> Vec<bool> {
    pulses(&timeline.borrow()).iter().map(Pulse::bit).collect()
}
