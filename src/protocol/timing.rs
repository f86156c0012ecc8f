//! Pulse timing set used by the encoder and the transmitter.

use crate::protocol::constants::{
    LATCH_HIGH_US, LATCH_LOW_US, PULSE_HIGH_US, PULSE_LONG_US, PULSE_SHORT_US, REPEAT_GAP_US,
};

/// Durations (microseconds) of every physical element of a transmission.
///
/// [`Timing::PROTOCOL`] is what real receivers expect. Other values are only
/// useful when tuning against a specific receiver or transmitter module.
///
/// # Examples
///
/// ```
/// use nexa_pico::protocol::timing::Timing;
///
/// let timing = Timing::default();
/// assert_eq!(timing.pair(false), (280, 1240));
/// assert_eq!(timing.pair(true), (1240, 280));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    /// High period before every data low period
    pub pulse_high_us: u16,
    /// Short low period
    pub short_low_us: u16,
    /// Long low period
    pub long_low_us: u16,
    /// Latch high period
    pub latch_high_us: u16,
    /// Latch low (settle) period
    pub latch_low_us: u16,
    /// Gap after every repetition
    pub repeat_gap_us: u16,
}

impl Timing {
    /// Protocol timings.
    pub const PROTOCOL: Self = Self {
        pulse_high_us: PULSE_HIGH_US,
        short_low_us: PULSE_SHORT_US,
        long_low_us: PULSE_LONG_US,
        latch_high_us: LATCH_HIGH_US,
        latch_low_us: LATCH_LOW_US,
        repeat_gap_us: REPEAT_GAP_US,
    };

    /// Low periods encoding one logical bit: 0 is (short, long), 1 is (long, short).
    #[inline]
    pub const fn pair(&self, bit: bool) -> (u16, u16) {
        if bit {
            (self.long_low_us, self.short_low_us)
        } else {
            (self.short_low_us, self.long_low_us)
        }
    }

    /// Low periods of the dim selector: (short, short).
    #[inline]
    pub const fn dim_selector(&self) -> (u16, u16) {
        (self.short_low_us, self.short_low_us)
    }

    /// Time spent in one latch.
    #[inline]
    pub const fn latch_us(&self) -> u32 {
        self.latch_high_us as u32 + self.latch_low_us as u32
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::PROTOCOL
    }
}
