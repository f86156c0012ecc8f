//! Remote commands and dim levels.
//!
//! ## Dim level scaling
//!
//! Callers give a dim level as a percentage (0-100). The frame carries 4 bits,
//! so the percentage is rescaled to 0-15 rounding half up:
//! `wire = (percent * 15 + 50) / 100`. 0% maps to 0 and 100% to 15.

use crate::addressing::Unit;
use crate::error::{NexaError, Result};
use crate::protocol::constants::{MAX_DIM_LEVEL, MAX_WIRE_DIM, SWITCH_HIGH};
use core::fmt;

/// Dim level as a percentage (0-100).
///
/// # Examples
///
/// ```
/// use nexa_pico::DimLevel;
///
/// let level = DimLevel::new(50).unwrap();
/// assert_eq!(level.percent(), 50);
/// assert_eq!(level.wire_value(), 8);
///
/// assert!(DimLevel::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct DimLevel {
    percent: u8,
}

impl DimLevel {
    /// Maximum dim level (percent)
    pub const MAX: u8 = MAX_DIM_LEVEL;

    /// Create a dim level.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `percent` is greater than 100.
    pub fn new(percent: u8) -> Result<Self> {
        Self::checked(percent).ok_or_else(NexaError::dim_level_out_of_range)
    }

    /// Const constructor, `None` when out of range.
    #[inline]
    pub const fn checked(percent: u8) -> Option<Self> {
        if percent > Self::MAX {
            None
        } else {
            Some(Self { percent })
        }
    }

    /// Level as given (0-100).
    #[inline(always)]
    pub const fn percent(self) -> u8 {
        self.percent
    }

    /// Level rescaled to the 4-bit wire value (0-15).
    #[inline]
    pub const fn wire_value(self) -> u8 {
        let scaled = (self.percent as u16 * MAX_WIRE_DIM as u16 + 50) / MAX_DIM_LEVEL as u16;
        scaled as u8
    }
}

impl TryFrom<u8> for DimLevel {
    type Error = NexaError;

    fn try_from(percent: u8) -> Result<Self> {
        Self::new(percent)
    }
}

impl From<DimLevel> for u8 {
    #[inline(always)]
    fn from(level: DimLevel) -> u8 {
        level.percent
    }
}

impl fmt::Display for DimLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent)
    }
}

/// What a frame does to its target: switch it off, on, or dim it.
///
/// # Examples
///
/// ```
/// use nexa_pico::{DimLevel, SwitchValue};
///
/// assert_eq!(SwitchValue::from_raw(0).unwrap(), SwitchValue::Off);
/// assert_eq!(SwitchValue::from_raw(1).unwrap(), SwitchValue::On);
/// assert_eq!(
///     SwitchValue::from_raw(40).unwrap(),
///     SwitchValue::Dim(DimLevel::new(40).unwrap())
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwitchValue {
    /// Switch off
    Off,
    /// Switch on
    On,
    /// Dim to a level
    Dim(DimLevel),
}

impl SwitchValue {
    /// Interpret a raw switch value: 0 is off, 1 is on, 2-100 is a dim level.
    ///
    /// # Errors
    ///
    /// Returns an encoding error for values above 100.
    pub fn from_raw(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Off),
            SWITCH_HIGH => Ok(Self::On),
            level => DimLevel::new(level).map(Self::Dim),
        }
    }

    /// Check if this value carries a dim level
    pub const fn is_dim(self) -> bool {
        matches!(self, Self::Dim(_))
    }
}

impl From<bool> for SwitchValue {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl From<DimLevel> for SwitchValue {
    fn from(level: DimLevel) -> Self {
        Self::Dim(level)
    }
}

/// A complete remote command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Switch one unit on
    On(Unit),
    /// Switch one unit off
    Off(Unit),
    /// Dim one unit
    Dim(Unit, DimLevel),
    /// Switch every unit paired with the controller on
    GroupOn,
    /// Switch every unit paired with the controller off
    GroupOff,
}

impl Command {
    /// Build the unit command matching a switch value.
    pub const fn switch(unit: Unit, value: SwitchValue) -> Self {
        match value {
            SwitchValue::Off => Self::Off(unit),
            SwitchValue::On => Self::On(unit),
            SwitchValue::Dim(level) => Self::Dim(unit, level),
        }
    }

    /// Target unit, `None` for group commands.
    pub const fn unit(self) -> Option<Unit> {
        match self {
            Self::On(unit) | Self::Off(unit) | Self::Dim(unit, _) => Some(unit),
            Self::GroupOn | Self::GroupOff => None,
        }
    }

    /// Check if this is a group command
    pub const fn is_group(self) -> bool {
        matches!(self, Self::GroupOn | Self::GroupOff)
    }

    /// Action carried by the command flag (and dim field).
    pub const fn value(self) -> SwitchValue {
        match self {
            Self::On(_) | Self::GroupOn => SwitchValue::On,
            Self::Off(_) | Self::GroupOff => SwitchValue::Off,
            Self::Dim(_, level) => SwitchValue::Dim(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_rescale_bounds() {
        assert_eq!(DimLevel::new(0).unwrap().wire_value(), 0);
        assert_eq!(DimLevel::new(100).unwrap().wire_value(), 15);
    }

    #[test]
    fn test_dim_rescale_rounding() {
        // (percent * 15 + 50) / 100
        let cases = [
            (1, 0),
            (3, 0),
            (4, 1),
            (10, 2),
            (33, 5),
            (50, 8),
            (66, 10),
            (90, 14),
            (96, 14),
            (97, 15),
        ];
        for (percent, wire) in cases {
            assert_eq!(DimLevel::new(percent).unwrap().wire_value(), wire, "{percent}%");
        }
    }

    #[test]
    fn test_dim_rescale_monotonic() {
        let mut last = 0;
        for percent in 0..=100 {
            let wire = DimLevel::new(percent).unwrap().wire_value();
            assert!(wire >= last);
            assert!(wire <= 15);
            last = wire;
        }
    }

    #[test]
    fn test_dim_level_out_of_range() {
        let err = DimLevel::new(101).unwrap_err();
        match err {
            NexaError::Encoding(e) => assert!(e.is_dim_level_out_of_range()),
            NexaError::Output(_) => panic!("expected encoding error"),
        }
    }

    #[test]
    fn test_switch_value_from_raw() {
        assert_eq!(SwitchValue::from_raw(0).unwrap(), SwitchValue::Off);
        assert_eq!(SwitchValue::from_raw(1).unwrap(), SwitchValue::On);
        assert_eq!(
            SwitchValue::from_raw(2).unwrap(),
            SwitchValue::Dim(DimLevel::new(2).unwrap())
        );
        assert_eq!(
            SwitchValue::from_raw(100).unwrap(),
            SwitchValue::Dim(DimLevel::new(100).unwrap())
        );
        assert!(SwitchValue::from_raw(101).is_err());
        assert!(SwitchValue::from_raw(255).is_err());
    }

    #[test]
    fn test_command_switch() {
        let unit = Unit::new(4).unwrap();
        let level = DimLevel::new(70).unwrap();
        assert_eq!(Command::switch(unit, SwitchValue::Off), Command::Off(unit));
        assert_eq!(Command::switch(unit, SwitchValue::On), Command::On(unit));
        assert_eq!(Command::switch(unit, level.into()), Command::Dim(unit, level));
    }

    #[test]
    fn test_command_accessors() {
        let unit = Unit::new(2).unwrap();
        assert_eq!(Command::On(unit).unit(), Some(unit));
        assert_eq!(Command::GroupOff.unit(), None);
        assert!(Command::GroupOn.is_group());
        assert!(!Command::Off(unit).is_group());
        assert_eq!(Command::GroupOn.value(), SwitchValue::On);
        assert!(Command::Dim(unit, DimLevel::new(5).unwrap()).value().is_dim());
    }
}
