//! Error types for Nexa operations following M-ERRORS-CANONICAL-STRUCTS guideline.
//!
//! This module provides structured error types with backtraces (when std is enabled)
//! and helper methods for error information.
//!
//! The taxonomy is deliberately narrow: the protocol is fire-and-forget, so the only
//! failures are rejected inputs (caught before any pin is touched) and faults
//! reported by the output pins themselves.

use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for Nexa operations.
pub type Result<T> = core::result::Result<T, NexaError>;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

/// Encoding error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum EncodingErrorKind {
    UnitOutOfRange,
    ControllerIdOutOfRange,
    DimLevelOutOfRange,
}

/// Output line that reported a fault (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum OutputErrorKind {
    TxPin,
    Indicator,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// Nexa remote error types.
///
/// This is the main error type returned by all Nexa operations.
/// It contains a backtrace (when std feature is enabled) and detailed
/// error information through helper methods.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NexaError {
    /// A value cannot be represented in its frame field (unit, controller id, dim level)
    Encoding(EncodingError),
    /// The transmitter or indicator pin failed while a frame was being emitted
    Output(OutputError),
}

// =============================================================================
// Structured Error Types
// =============================================================================

/// Encoding error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodingError {
    kind: EncodingErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl EncodingError {
    pub(crate) fn new(kind: EncodingErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the unit (device address) was outside 0-15
    pub fn is_unit_out_of_range(&self) -> bool {
        matches!(self.kind, EncodingErrorKind::UnitOutOfRange)
    }

    /// Check if the controller id did not fit in 26 bits
    pub fn is_controller_id_out_of_range(&self) -> bool {
        matches!(self.kind, EncodingErrorKind::ControllerIdOutOfRange)
    }

    /// Check if the dim level was outside 0-100
    pub fn is_dim_level_out_of_range(&self) -> bool {
        matches!(self.kind, EncodingErrorKind::DimLevelOutOfRange)
    }
}

/// Output pin error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputError {
    kind: OutputErrorKind,
    hal_kind: embedded_hal::digital::ErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl OutputError {
    pub(crate) fn new(kind: OutputErrorKind, hal_kind: embedded_hal::digital::ErrorKind) -> Self {
        Self {
            kind,
            hal_kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the RF transmitter data pin failed
    pub fn is_tx_pin(&self) -> bool {
        matches!(self.kind, OutputErrorKind::TxPin)
    }

    /// Check if the indicator pin failed
    pub fn is_indicator(&self) -> bool {
        matches!(self.kind, OutputErrorKind::Indicator)
    }

    /// The generic error kind reported by the pin driver
    pub fn hal_kind(&self) -> embedded_hal::digital::ErrorKind {
        self.hal_kind
    }
}

// =============================================================================
// Convenience Constructors for NexaError
// =============================================================================

impl NexaError {
    // Encoding errors
    pub(crate) fn unit_out_of_range() -> Self {
        Self::Encoding(EncodingError::new(EncodingErrorKind::UnitOutOfRange))
    }

    pub(crate) fn controller_id_out_of_range() -> Self {
        Self::Encoding(EncodingError::new(EncodingErrorKind::ControllerIdOutOfRange))
    }

    pub(crate) fn dim_level_out_of_range() -> Self {
        Self::Encoding(EncodingError::new(EncodingErrorKind::DimLevelOutOfRange))
    }

    // Output errors
    pub(crate) fn tx_pin(hal_kind: embedded_hal::digital::ErrorKind) -> Self {
        Self::Output(OutputError::new(OutputErrorKind::TxPin, hal_kind))
    }

    pub(crate) fn indicator(hal_kind: embedded_hal::digital::ErrorKind) -> Self {
        Self::Output(OutputError::new(OutputErrorKind::Indicator, hal_kind))
    }

    /// Check if the input was rejected before any hardware activity
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_))
    }

    /// Check if a pin failed during transmission
    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output(_))
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for NexaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NexaError::Encoding(e) => write!(f, "Encoding error: {:?}", e.kind),
            NexaError::Output(e) => {
                write!(f, "Output error: {:?} ({:?})", e.kind, e.hal_kind)
            }
        }
    }
}

// Implement std::error::Error for std-based applications
#[cfg(feature = "std")]
impl std::error::Error for NexaError {}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorKind;

    #[test]
    fn test_encoding_helpers() {
        let err = NexaError::unit_out_of_range();
        assert!(err.is_encoding());
        assert!(!err.is_output());
        match err {
            NexaError::Encoding(e) => {
                assert!(e.is_unit_out_of_range());
                assert!(!e.is_dim_level_out_of_range());
            }
            NexaError::Output(_) => panic!("expected encoding error"),
        }
    }

    #[test]
    fn test_output_helpers() {
        let err = NexaError::indicator(ErrorKind::Other);
        match err {
            NexaError::Output(e) => {
                assert!(e.is_indicator());
                assert!(!e.is_tx_pin());
                assert_eq!(e.hal_kind(), ErrorKind::Other);
            }
            NexaError::Encoding(_) => panic!("expected output error"),
        }
    }

    #[test]
    fn test_display() {
        let msg = format!("{}", NexaError::dim_level_out_of_range());
        assert_eq!(msg, "Encoding error: DimLevelOutOfRange");

        let msg = format!("{}", NexaError::tx_pin(ErrorKind::Other));
        assert_eq!(msg, "Output error: TxPin (Other)");
    }
}
