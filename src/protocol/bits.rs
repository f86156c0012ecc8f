//! Integer to fixed-width bit sequence conversion.
//!
//! Frame fields are sent most significant bit first. Callers validate that a
//! value fits its field before converting it; higher bits are masked off here
//! and never spill into a neighbouring field.

use heapless::Vec;

/// Widest field handled by the converter
pub const MAX_BIT_WIDTH: usize = 32;

/// Big-endian bit sequence of at most [`MAX_BIT_WIDTH`] bits.
pub type Bits = Vec<bool, MAX_BIT_WIDTH>;

/// Convert the lowest `width` bits of `value` into booleans, MSB first.
///
/// # Examples
///
/// ```
/// use nexa_pico::protocol::bits::to_bits;
///
/// assert_eq!(to_bits(5, 4).as_slice(), &[false, true, false, true]);
/// ```
pub fn to_bits(value: u32, width: usize) -> Bits {
    debug_assert!(width <= MAX_BIT_WIDTH, "bit width {width} exceeds {MAX_BIT_WIDTH}");
    debug_assert!(
        value.checked_shr(width as u32).unwrap_or(0) == 0,
        "value {value} does not fit in {width} bits"
    );

    let width = width.min(MAX_BIT_WIDTH);
    (0..width).rev().map(|shift| (value >> shift) & 1 == 1).collect()
}

/// Inverse of [`to_bits`]: fold an MSB-first bit slice back into an integer.
///
/// Only the last 32 bits contribute.
pub fn from_bits(bits: &[bool]) -> u32 {
    bits.iter()
        .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit))
}
