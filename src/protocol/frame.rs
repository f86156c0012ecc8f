//! Frame encoding: from a command to the pulse buffer drained by the transmitter.
//!
//! ## Wire format
//!
//! Every logical bit becomes two low periods (each preceded by the common
//! high pulse sent by the transmitter):
//!
//! ```text
//! bit 0         short, long
//! bit 1         long,  short
//! dim selector  short, short   (command flag position of dim frames)
//! ```
//!
//! Bit `i` of the frame lives at pulse indices `2i` and `2i + 1`.

use crate::addressing::{ControllerId, Unit};
use crate::protocol::bits::{from_bits, to_bits, Bits};
use crate::protocol::command::{Command, DimLevel, SwitchValue};
use crate::protocol::constants::{
    COMMAND_FLAG_OFFSET, CONTROLLER_ID_LENGTH, CONTROLLER_ID_OFFSET, DEVICE_ID_LENGTH,
    DEVICE_ID_OFFSET, DIM_FRAME_BITS, DIM_LENGTH, DIM_OFFSET, FRAME_BITS, GROUP_FLAG_OFFSET,
    MAX_PULSES, PULSES_PER_BIT,
};
use crate::protocol::timing::Timing;

/// Logical content of one frame, independent of pulse timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Group flag (bit 26)
    pub group: bool,
    /// Command flag and optional dim field
    pub value: SwitchValue,
    /// Device field (bits 28-31)
    pub unit: Unit,
}

impl Frame {
    /// Logical frame length: 36 bits for dim frames, 32 otherwise.
    #[inline]
    pub const fn bit_len(&self) -> usize {
        if self.value.is_dim() {
            DIM_FRAME_BITS
        } else {
            FRAME_BITS
        }
    }

    /// Physical pulse count: twice the bit length.
    #[inline]
    pub const fn pulse_len(&self) -> usize {
        self.bit_len() * PULSES_PER_BIT
    }
}

impl From<Command> for Frame {
    fn from(command: Command) -> Self {
        Self {
            group: command.is_group(),
            value: command.value(),
            unit: command.unit().unwrap_or(Unit::GROUP),
        }
    }
}

/// Decoded pulse pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireSymbol {
    /// Logical 0 (short, long)
    Zero,
    /// Logical 1 (long, short)
    One,
    /// Dim selector (short, short)
    DimSelector,
}

impl WireSymbol {
    /// Logical bit value, `None` for the dim selector.
    pub const fn bit(self) -> Option<bool> {
        match self {
            Self::Zero => Some(false),
            Self::One => Some(true),
            Self::DimSelector => None,
        }
    }
}

/// Fixed-capacity buffer of low-period durations (microseconds).
///
/// Sized for the longest frame so dim and on/off frames reuse the same
/// storage; only the first [`len`](PulseBuffer::len) entries belong to the
/// last encoded frame.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseBuffer {
    pulses: [u16; MAX_PULSES],
    len: usize,
}

impl PulseBuffer {
    /// Buffer capacity in pulses
    pub const CAPACITY: usize = MAX_PULSES;

    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            pulses: [0; MAX_PULSES],
            len: 0,
        }
    }

    /// Pulses of the last encoded frame.
    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.pulses[..self.len]
    }

    /// Number of pulses in the last encoded frame.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if no frame has been encoded yet
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Low period at a physical pulse index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<u16> {
        self.as_slice().get(index).copied()
    }

    /// Decode the pulse pair of logical bit `offset`.
    ///
    /// The pair is classified by comparing its two periods, so decoding does
    /// not depend on the timing set used for encoding.
    pub fn symbol(&self, offset: usize) -> Option<WireSymbol> {
        let index = offset.checked_mul(PULSES_PER_BIT)?;
        let first = self.get(index)?;
        let second = self.get(index.checked_add(1)?)?;
        Some(match first.cmp(&second) {
            core::cmp::Ordering::Less => WireSymbol::Zero,
            core::cmp::Ordering::Greater => WireSymbol::One,
            core::cmp::Ordering::Equal => WireSymbol::DimSelector,
        })
    }

    /// Read back a multi-bit field.
    ///
    /// Returns `None` if the field runs past the frame or contains a dim
    /// selector.
    pub fn read_field(&self, offset: usize, width: usize) -> Option<u32> {
        let end = offset.checked_add(width)?;
        let mut bits = Bits::new();
        for bit in offset..end {
            bits.push(self.symbol(bit)?.bit()?).ok()?;
        }
        Some(from_bits(&bits))
    }

    fn write_pair(&mut self, offset: usize, (first, second): (u16, u16)) {
        debug_assert!(offset < DIM_FRAME_BITS, "bit offset {offset} past the frame");
        let index = offset * PULSES_PER_BIT;
        self.pulses[index] = first;
        self.pulses[index + 1] = second;
    }
}

impl Default for PulseBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PulseBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for PulseBuffer {}

/// Writes frames into an owned [`PulseBuffer`].
///
/// The buffer is overwritten in place by every [`encode`](FrameEncoder::encode);
/// nothing else survives between frames.
///
/// # Examples
///
/// ```
/// use nexa_pico::protocol::frame::FrameEncoder;
/// use nexa_pico::protocol::timing::Timing;
/// use nexa_pico::{Command, ControllerId, Unit};
///
/// let mut encoder = FrameEncoder::new(ControllerId::DEFAULT, Timing::PROTOCOL);
/// let pulses = encoder.encode(Command::Off(Unit::new(5).unwrap()));
///
/// assert_eq!(pulses.len(), 64);
/// assert_eq!(pulses.read_field(28, 4), Some(5));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameEncoder {
    buffer: PulseBuffer,
    controller: ControllerId,
    timing: Timing,
}

impl FrameEncoder {
    /// Create an encoder for one controller id.
    pub const fn new(controller: ControllerId, timing: Timing) -> Self {
        Self {
            buffer: PulseBuffer::new(),
            controller,
            timing,
        }
    }

    /// Controller id written into every frame.
    pub const fn controller(&self) -> ControllerId {
        self.controller
    }

    /// Last encoded frame.
    pub const fn buffer(&self) -> &PulseBuffer {
        &self.buffer
    }

    /// Encode a complete frame and return the filled buffer.
    pub fn encode(&mut self, frame: impl Into<Frame>) -> &PulseBuffer {
        let frame = frame.into();

        self.set_controller_field();
        self.set_group_flag(frame.group);
        match frame.value {
            SwitchValue::Off => self.set_command_flag(false),
            SwitchValue::On => self.set_command_flag(true),
            SwitchValue::Dim(_) => self.set_dim_selector(),
        }
        self.set_device_field(frame.unit);
        if let SwitchValue::Dim(level) = frame.value {
            self.set_dim_field(level);
        }

        self.buffer.len = frame.pulse_len();
        &self.buffer
    }

    /// Write one logical bit at frame offset `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is not below 36, the length of a dim frame.
    #[inline]
    pub fn set_bit(&mut self, offset: usize, value: bool) {
        self.buffer.write_pair(offset, self.timing.pair(value));
    }

    /// Write the controller id into bits 0-25.
    pub fn set_controller_field(&mut self) {
        self.set_field(CONTROLLER_ID_OFFSET, self.controller.raw(), CONTROLLER_ID_LENGTH);
    }

    /// Write the group flag (bit 26).
    pub fn set_group_flag(&mut self, group: bool) {
        self.set_bit(GROUP_FLAG_OFFSET, group);
    }

    /// Write the on/off flag (bit 27).
    pub fn set_command_flag(&mut self, on: bool) {
        self.set_bit(COMMAND_FLAG_OFFSET, on);
    }

    /// Write the dim selector (short, short) at the command flag position.
    pub fn set_dim_selector(&mut self) {
        self.buffer
            .write_pair(COMMAND_FLAG_OFFSET, self.timing.dim_selector());
    }

    /// Write the unit into bits 28-31.
    pub fn set_device_field(&mut self, unit: Unit) {
        self.set_field(DEVICE_ID_OFFSET, u32::from(unit.raw()), DEVICE_ID_LENGTH);
    }

    /// Write the rescaled dim level into bits 32-35.
    pub fn set_dim_field(&mut self, level: DimLevel) {
        self.set_field(DIM_OFFSET, u32::from(level.wire_value()), DIM_LENGTH);
    }

    fn set_field(&mut self, offset: usize, value: u32, width: usize) {
        for (i, bit) in to_bits(value, width).into_iter().enumerate() {
            self.set_bit(offset + i, bit);
        }
    }
}
