//! Nexa self-learning protocol constants: pulse timings and frame layout.
//!
//! The frame is 32 bits (36 with a dim level), every bit goes on the wire
//! as two low periods, each preceded by the same short high pulse:
//!
//! ```text
//! bits 0-25   controller id
//! bit  26     group flag
//! bit  27     on/off flag (dim selector for dim commands)
//! bits 28-31  unit (device code)
//! bits 32-35  dim level (dim commands only)
//! ```

// =============================================================================
// Pulse Timings (microseconds)
// =============================================================================

// Timings follow captures of a real HE-100 remote; receivers drop frames
// whose low periods drift more than a few tens of microseconds.

/// High period preceding every low pulse of a data bit
pub const PULSE_HIGH_US: u16 = 270;

/// Short low period
pub const PULSE_SHORT_US: u16 = 280;

/// Long low period
pub const PULSE_LONG_US: u16 = 1240;

/// High period of the start/stop latch
pub const LATCH_HIGH_US: u16 = 280;

/// Low (settle) period of the start/stop latch
pub const LATCH_LOW_US: u16 = 2675;

/// Pause after every repetition, outside the critical section
pub const REPEAT_GAP_US: u16 = 9500;

// =============================================================================
// Frame Layout (logical bit offsets)
// =============================================================================

/// First bit of the controller id field
pub const CONTROLLER_ID_OFFSET: usize = 0;
/// Width of the controller id field
pub const CONTROLLER_ID_LENGTH: usize = 26;
/// Group flag bit
pub const GROUP_FLAG_OFFSET: usize = 26;
/// On/off (or dim selector) bit
pub const COMMAND_FLAG_OFFSET: usize = 27;
/// First bit of the unit field
pub const DEVICE_ID_OFFSET: usize = 28;
/// Width of the unit field
pub const DEVICE_ID_LENGTH: usize = 4;
/// First bit of the dim level field
pub const DIM_OFFSET: usize = 32;
/// Width of the dim level field
pub const DIM_LENGTH: usize = 4;

/// Frame length of on/off and group commands
pub const FRAME_BITS: usize = 32;
/// Frame length of dim commands
pub const DIM_FRAME_BITS: usize = DIM_OFFSET + DIM_LENGTH;

/// Physical pulses per logical bit
pub const PULSES_PER_BIT: usize = 2;
/// Pulse count of an on/off frame
pub const FRAME_PULSES: usize = FRAME_BITS * PULSES_PER_BIT;
/// Pulse count of a dim frame, also the pulse buffer capacity
pub const MAX_PULSES: usize = DIM_FRAME_BITS * PULSES_PER_BIT;

// =============================================================================
// Value Ranges and Defaults
// =============================================================================

/// Largest controller id that fits the 26-bit field
pub const MAX_CONTROLLER_ID: u32 = (1 << CONTROLLER_ID_LENGTH) - 1;

/// Largest unit that fits the 4-bit field
pub const MAX_UNIT: u8 = (1 << DEVICE_ID_LENGTH) - 1;

/// Largest dim level accepted from callers (percent)
pub const MAX_DIM_LEVEL: u8 = 100;

/// Largest dim value on the wire
pub const MAX_WIRE_DIM: u8 = (1 << DIM_LENGTH) - 1;

/// Controller id used when none is configured
pub const DEFAULT_CONTROLLER_ID: u32 = 1_234_567;

/// Repetitions of every frame when none is configured
pub const DEFAULT_TRANSMIT_COUNT: u8 = 10;

/// Raw switch value meaning "on"; 0 means "off", anything else is a dim level
pub const SWITCH_HIGH: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_contiguous() {
        assert_eq!(CONTROLLER_ID_OFFSET + CONTROLLER_ID_LENGTH, GROUP_FLAG_OFFSET);
        assert_eq!(GROUP_FLAG_OFFSET + 1, COMMAND_FLAG_OFFSET);
        assert_eq!(COMMAND_FLAG_OFFSET + 1, DEVICE_ID_OFFSET);
        assert_eq!(DEVICE_ID_OFFSET + DEVICE_ID_LENGTH, FRAME_BITS);
        assert_eq!(FRAME_BITS, DIM_OFFSET);
    }

    #[test]
    fn test_pulse_counts() {
        assert_eq!(FRAME_PULSES, 64);
        assert_eq!(MAX_PULSES, 72);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(MAX_CONTROLLER_ID, 67_108_863);
        assert_eq!(MAX_UNIT, 15);
        assert_eq!(MAX_WIRE_DIM, 15);
        assert!(DEFAULT_CONTROLLER_ID <= MAX_CONTROLLER_ID);
    }
}
