//! Radio output: the pin-level side of the protocol.
//!
//! The transmitter drives any [`embedded_hal::digital::OutputPin`] with
//! delays from [`embedded_hal::delay::DelayNs`], so it runs on every HAL that
//! implements the 1.0 traits. The timing-critical part of each repetition is
//! wrapped in an [`InterruptLock`](lock::InterruptLock).

use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, OutputPin};

pub mod lock;
#[cfg(any(test, feature = "std"))]
pub mod mock;
pub mod transmitter;

pub use lock::{GlobalCriticalSection, InterruptLock, LockGuard};
pub use transmitter::Transmitter;

/// Placeholder indicator for remotes built without one.
///
/// Never driven: a transmitter without an indicator stores `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoIndicator;

impl ErrorType for NoIndicator {
    type Error = Infallible;
}

impl OutputPin for NoIndicator {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
