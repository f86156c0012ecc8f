//! Utility functions for configuration parsing

use crate::addressing::{ControllerId, Unit};
use crate::configuration::CONFIG;
use crate::protocol::constants::DEFAULT_TRANSMIT_COUNT;

/// Look up `key` in `config`.
///
/// # Returns
/// * `Option<&str>` - trimmed value of the first `KEY=value` line, if any
pub fn config_value<'a>(config: &'a str, key: &str) -> Option<&'a str> {
    config.lines().find_map(|line| {
        line.trim()
            .strip_prefix(key)
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('='))
            .map(str::trim)
    })
}

/// Extracts the controller id from configuration.
///
/// Falls back to [`ControllerId::DEFAULT`] when the key is missing, not a
/// number, 0 or wider than 26 bits.
pub fn get_controller_id() -> ControllerId {
    parse_controller_id(CONFIG)
}

/// Extracts the number of repetitions per command from configuration.
pub fn get_transmit_count() -> u8 {
    parse_transmit_count(CONFIG)
}

/// Extracts the unit driven by the firmware from configuration.
pub fn get_unit() -> Unit {
    parse_unit(CONFIG)
}

fn parse_controller_id(config: &str) -> ControllerId {
    config_value(config, "NEXA_CONTROLLER_ID")
        .and_then(|value| value.parse::<u32>().ok())
        .and_then(|raw| ControllerId::or_default_if_zero(raw).ok())
        .unwrap_or_default()
}

fn parse_transmit_count(config: &str) -> u8 {
    config_value(config, "NEXA_TRANSMIT_COUNT")
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_TRANSMIT_COUNT)
}

fn parse_unit(config: &str) -> Unit {
    config_value(config, "NEXA_UNIT")
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}
