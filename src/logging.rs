//! Unified Logging Macros for nexa-pico
//!
//! This module provides a unified logging interface that automatically
//! selects between `log::` (USB logger) and `defmt::` based on the
//! active feature flags.
//!
//! # Usage
//!
//! ```rust,ignore
//! nexa_log!(info, "Remote ready");
//! nexa_log!(debug, "Encoded {} pulses", n);
//! nexa_log!(warn, "Indicator pin failed");
//! nexa_log!(trace, "Repetition {}", i);
//! ```
//!
//! # Feature Flags
//!
//! - `usb-logger` - Uses `log::` crate (for USB serial debugging)
//! - `defmt` - Uses `defmt::` (more efficient for embedded)
//! - neither - log statements compile away, arguments are still evaluated
//!
//! Only pass `Copy` values (integers, `&str`) so the three backends accept
//! the same call sites.

/// Unified logging macro - automatically selects log:: or defmt:: based on features
///
/// This macro provides a consistent logging API across the entire crate,
/// regardless of which logging backend is configured at compile time.
#[macro_export]
#[cfg(feature = "usb-logger")]
macro_rules! nexa_log {
    (info, $($arg:tt)*) => { log::info!($($arg)*) };
    (debug, $($arg:tt)*) => { log::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { log::warn!($($arg)*) };
    (error, $($arg:tt)*) => { log::error!($($arg)*) };
    (trace, $($arg:tt)*) => { log::trace!($($arg)*) };
}

#[macro_export]
#[cfg(all(feature = "defmt", not(feature = "usb-logger")))]
macro_rules! nexa_log {
    (info, $($arg:tt)*) => { defmt::info!($($arg)*) };
    (debug, $($arg:tt)*) => { defmt::debug!($($arg)*) };
    (warn, $($arg:tt)*) => { defmt::warn!($($arg)*) };
    (error, $($arg:tt)*) => { defmt::error!($($arg)*) };
    (trace, $($arg:tt)*) => { defmt::trace!($($arg)*) };
}

#[macro_export]
#[cfg(not(any(feature = "defmt", feature = "usb-logger")))]
macro_rules! nexa_log {
    ($level:ident, $($arg:tt)*) => {{
        let _ = ($($arg)*);
    }};
}
