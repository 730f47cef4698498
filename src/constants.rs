pub const MAX_DIGITS: u8 = 4;
pub const MAX_BRIGHTNESS: u8 = 8;
pub const DEFAULT_BRIGHTNESS: u8 = 7;
pub const MAX_VALUE: u16 = 9999;
pub const DP_MASK: u8 = 0x80; // bit 7: decimal point
pub const BLANK: u8 = 0x00;

/// Segment patterns for 0-9, followed by the blank pattern at index 10.
pub const SEGMENTS: [u8; 11] = [
    0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F, BLANK,
];
pub const BLANK_INDEX: usize = 10;

/// Pulse and guard durations of the two-wire protocol, in microseconds.
///
/// The module decodes a bit from the high/low split of a 12us pulse, so the
/// total is the same for both values. Guard times are the minimum the module's
/// shift register needs between samples.
pub mod timing {
    pub const ZERO_HIGH_US: u32 = 4;
    pub const ZERO_LOW_US: u32 = 8;
    pub const ONE_HIGH_US: u32 = 8;
    pub const ONE_LOW_US: u32 = 4;
    pub const BIT_GUARD_US: u32 = 6; // after every bit, outside the critical section
    pub const DIGIT_GUARD_US: u32 = 10; // after the 8th bit of a pattern
    pub const PRIME_BITS: usize = 64; // zero bits clocked out by init
}
