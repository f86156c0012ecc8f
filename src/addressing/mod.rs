//! Nexa addressing.
//!
//! A frame is addressed by two values:
//! - the controller id, a 26-bit identity the receivers learn when paired
//! - the unit, a 4-bit device code under that controller

pub mod controller;
pub mod unit;

pub use controller::ControllerId;
pub use unit::Unit;
