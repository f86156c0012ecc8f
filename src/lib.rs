#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! # nexa-pico
//!
//! Nexa / HomeEasy self-learning 433 MHz remote control for embedded systems.
//!
//! This crate provides a `no_std` encoder and bit-banged transmitter for the
//! Nexa remote protocol, built on the `embedded-hal` 1.0 traits so it runs on
//! any HAL (Embassy on the RP2350 in the bundled firmware).
//!
//! ## Features
//!
//! - On, off, dim and group commands for up to 16 units per controller id
//! - Fixed-size pulse buffer, no allocation
//! - Critical section held per repetition only, gap yields under async
//! - Mockable pin, delay and lock for host tests
//!
//! ## Example
//!
//! ```rust,ignore
//! use nexa_pico::{unit, NexaRemote};
//!
//! let mut remote = NexaRemote::new(tx_pin, delay);
//! remote.on(unit!(1))?;
//! ```

// Macro modules (must be declared before use)
#[macro_use]
pub mod logging;
#[macro_use]
pub mod macros;

pub mod addressing;
pub mod configuration;
pub mod error;
pub mod protocol;
pub mod radio;
pub mod remote;
pub mod utility;

// Re-export commonly used types
#[doc(inline)]
pub use addressing::{ControllerId, Unit};
#[doc(inline)]
pub use error::{NexaError, Result};
#[doc(inline)]
pub use protocol::command::{Command, DimLevel, SwitchValue};
#[doc(inline)]
pub use protocol::timing::Timing;
#[doc(inline)]
pub use remote::{NexaRemote, RemoteConfig};
