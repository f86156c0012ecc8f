//! Nexa self-learning protocol: frame layout, command model and wire encoding.
//!
//! This module turns a [`Command`](command::Command) into the pulse
//! durations the transmitter plays back.

pub mod bits;
pub mod command;
pub mod constants;
pub mod frame;
pub mod timing;
