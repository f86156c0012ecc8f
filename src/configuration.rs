//! Firmware settings as `KEY=value` lines.
//! Edit for your own installation.

pub const CONFIG: &str = r#"
NEXA_CONTROLLER_ID=1234567
NEXA_TRANSMIT_COUNT=10
NEXA_UNIT=1
"#;
