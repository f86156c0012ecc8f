//! Nexa unit (device code).
//!
//! Internally stored as the 4-bit value written to frame bits 28-31.
//! Unit 0 is also the value carried by group commands.

use crate::error::{NexaError, Result};
use crate::protocol::constants::MAX_UNIT;
use core::fmt;

/// Device code of a paired receiver (0-15).
///
/// # Examples
///
/// ```
/// use nexa_pico::Unit;
///
/// let unit = Unit::new(5).unwrap();
/// assert_eq!(unit.raw(), 5);
///
/// assert!(Unit::new(16).is_err());
///
/// let unit: Unit = "12".parse().unwrap();
/// assert_eq!(u8::from(unit), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Unit {
    raw: u8,
}

impl Unit {
    /// Maximum unit value (4 bits)
    pub const MAX: u8 = MAX_UNIT;

    /// Unit written into the device field of group commands
    pub const GROUP: Self = Self { raw: 0 };

    /// Create a unit.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `raw` is greater than 15.
    pub fn new(raw: u8) -> Result<Self> {
        Self::checked(raw).ok_or_else(NexaError::unit_out_of_range)
    }

    /// Const constructor, `None` when out of range.
    ///
    /// Used by the [`unit!`](crate::unit) macro for compile-time validation.
    #[inline]
    pub const fn checked(raw: u8) -> Option<Self> {
        if raw > Self::MAX {
            None
        } else {
            Some(Self { raw })
        }
    }

    /// Get the raw 4-bit value.
    #[inline(always)]
    pub const fn raw(self) -> u8 {
        self.raw
    }
}

impl TryFrom<u8> for Unit {
    type Error = NexaError;

    fn try_from(raw: u8) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<Unit> for u8 {
    #[inline(always)]
    fn from(unit: Unit) -> u8 {
        unit.raw
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl core::str::FromStr for Unit {
    type Err = NexaError;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s
            .trim()
            .parse::<u8>()
            .map_err(|_parse| NexaError::unit_out_of_range())?;
        Self::new(raw)
    }
}
