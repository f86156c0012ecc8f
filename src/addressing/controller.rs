//! Nexa controller id.
//!
//! The controller id is the remote's identity: receivers learn it when they
//! are paired and ignore frames carrying any other id. It fills frame bits
//! 0-25.

use crate::error::{NexaError, Result};
use crate::protocol::constants::{DEFAULT_CONTROLLER_ID, MAX_CONTROLLER_ID};
use core::fmt;

/// 26-bit controller identity.
///
/// # Examples
///
/// ```
/// use nexa_pico::ControllerId;
///
/// let id = ControllerId::new(7_654_321).unwrap();
/// assert_eq!(id.raw(), 7_654_321);
///
/// // Default identity shared by every remote built without one
/// assert_eq!(ControllerId::default().raw(), 1_234_567);
///
/// // Zero selects the default identity
/// assert_eq!(ControllerId::or_default_if_zero(0).unwrap(), ControllerId::DEFAULT);
///
/// assert!(ControllerId::new(1 << 26).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct ControllerId {
    raw: u32,
}

impl ControllerId {
    /// Maximum controller id (26 bits)
    pub const MAX: u32 = MAX_CONTROLLER_ID;

    /// Identity used when none is configured
    pub const DEFAULT: Self = Self {
        raw: DEFAULT_CONTROLLER_ID,
    };

    /// Create a controller id.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `raw` does not fit in 26 bits.
    pub fn new(raw: u32) -> Result<Self> {
        Self::checked(raw).ok_or_else(NexaError::controller_id_out_of_range)
    }

    /// Like [`ControllerId::new`], but 0 selects [`ControllerId::DEFAULT`].
    pub fn or_default_if_zero(raw: u32) -> Result<Self> {
        if raw == 0 {
            Ok(Self::DEFAULT)
        } else {
            Self::new(raw)
        }
    }

    /// Const constructor, `None` when out of range.
    #[inline]
    pub const fn checked(raw: u32) -> Option<Self> {
        if raw > Self::MAX {
            None
        } else {
            Some(Self { raw })
        }
    }

    /// Get the raw 26-bit value.
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.raw
    }
}

impl Default for ControllerId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for ControllerId {
    type Error = NexaError;

    fn try_from(raw: u32) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<ControllerId> for u32 {
    #[inline(always)]
    fn from(id: ControllerId) -> u32 {
        id.raw
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl core::str::FromStr for ControllerId {
    type Err = NexaError;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s
            .trim()
            .parse::<u32>()
            .map_err(|_parse| NexaError::controller_id_out_of_range())?;
        Self::new(raw)
    }
}
