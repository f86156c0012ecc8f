//! High-level Nexa remote.
//!
//! This module provides the public API: on, off, dim, group on/off and the
//! raw switch dispatch. Each call encodes a complete frame into the remote's
//! own pulse buffer and transmits it before returning.
//!
//! ## Example
//!
//! ```rust,ignore
//! use nexa_pico::{unit, DimLevel, NexaRemote, RemoteConfig};
//!
//! let mut remote = NexaRemote::with_config(tx_pin, delay, RemoteConfig::default());
//!
//! remote.on(unit!(1))?;
//! remote.dim(unit!(2), DimLevel::new(40)?)?;
//! remote.group_off()?;
//! ```

use crate::addressing::{ControllerId, Unit};
use crate::error::Result;
use crate::protocol::command::{Command, DimLevel, SwitchValue};
use crate::protocol::constants::DEFAULT_TRANSMIT_COUNT;
use crate::protocol::frame::{FrameEncoder, PulseBuffer};
use crate::protocol::timing::Timing;
use crate::radio::lock::{GlobalCriticalSection, InterruptLock};
use crate::radio::transmitter::Transmitter;
use crate::radio::NoIndicator;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

/// Construction-time settings of a remote.
///
/// # Examples
///
/// ```
/// use nexa_pico::{ControllerId, RemoteConfig};
///
/// let config = RemoteConfig::default()
///     .with_controller_id(ControllerId::new(42).unwrap())
///     .with_transmit_count(5);
///
/// assert_eq!(config.controller_id.raw(), 42);
/// assert_eq!(config.transmit_count, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RemoteConfig {
    /// Identity written into every frame
    pub controller_id: ControllerId,
    /// Repetitions of every frame
    pub transmit_count: u8,
    /// Pulse timings
    pub timing: Timing,
}

impl RemoteConfig {
    /// Set the controller id.
    pub fn with_controller_id(mut self, controller_id: ControllerId) -> Self {
        self.controller_id = controller_id;
        self
    }

    /// Set the controller id from a raw value, 0 selecting the default id.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `raw` does not fit in 26 bits.
    pub fn with_controller_id_raw(self, raw: u32) -> Result<Self> {
        Ok(self.with_controller_id(ControllerId::or_default_if_zero(raw)?))
    }

    /// Set the number of repetitions.
    pub fn with_transmit_count(mut self, transmit_count: u8) -> Self {
        self.transmit_count = transmit_count;
        self
    }

    /// Set the pulse timings.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            controller_id: ControllerId::DEFAULT,
            transmit_count: DEFAULT_TRANSMIT_COUNT,
            timing: Timing::PROTOCOL,
        }
    }
}

/// Nexa remote control bound to one data pin.
///
/// Owns the pulse buffer: commands are serialized by `&mut self`, and the
/// buffer is overwritten by every command. Share a remote between tasks
/// behind a mutex.
#[derive(Debug)]
pub struct NexaRemote<P, D, L = GlobalCriticalSection, I = NoIndicator> {
    encoder: FrameEncoder,
    transmitter: Transmitter<P, D, L, I>,
}

impl<P: OutputPin, D: DelayNs> NexaRemote<P, D> {
    /// Create a remote with the default controller id, 10 repetitions and
    /// protocol timings.
    pub fn new(tx: P, delay: D) -> Self {
        Self::with_config(tx, delay, RemoteConfig::default())
    }

    /// Create a remote from explicit settings.
    pub fn with_config(tx: P, delay: D, config: RemoteConfig) -> Self {
        nexa_log!(
            info,
            "nexa: remote ready, controller {}, {} repetitions",
            config.controller_id.raw(),
            config.transmit_count
        );
        Self {
            encoder: FrameEncoder::new(config.controller_id, config.timing),
            transmitter: Transmitter::new(tx, delay, config.timing, config.transmit_count),
        }
    }
}

impl<P, D, L, I> NexaRemote<P, D, L, I> {
    /// Replace the preemption lock.
    pub fn with_lock<L2: InterruptLock>(self, lock: L2) -> NexaRemote<P, D, L2, I> {
        NexaRemote {
            encoder: self.encoder,
            transmitter: self.transmitter.with_lock(lock),
        }
    }

    /// Add an indicator pin, held high while each repetition is on air.
    pub fn with_indicator<I2: OutputPin>(self, indicator: I2) -> NexaRemote<P, D, L, I2> {
        NexaRemote {
            encoder: self.encoder,
            transmitter: self.transmitter.with_indicator(indicator),
        }
    }

    /// Controller id written into every frame.
    pub const fn controller_id(&self) -> ControllerId {
        self.encoder.controller()
    }

    /// Pulses of the last command.
    pub const fn pulses(&self) -> &PulseBuffer {
        self.encoder.buffer()
    }

    /// The transmitter driving the pins.
    pub const fn transmitter(&self) -> &Transmitter<P, D, L, I> {
        &self.transmitter
    }

    /// Encode a command without transmitting it.
    pub fn encode(&mut self, command: Command) -> &PulseBuffer {
        self.encoder.encode(command)
    }

    /// Give back the owned peripherals.
    pub fn release(self) -> (P, D, L, Option<I>) {
        self.transmitter.release()
    }
}

impl<P, D, L, I> NexaRemote<P, D, L, I>
where
    P: OutputPin,
    D: DelayNs,
    L: InterruptLock,
    I: OutputPin,
{
    /// Encode and transmit a command.
    pub fn send(&mut self, command: Command) -> Result<()> {
        let pulses = self.encoder.encode(command);
        nexa_log!(
            debug,
            "nexa: sending {} pulses x{}",
            pulses.len(),
            self.transmitter.transmit_count()
        );
        self.transmitter.transmit(pulses.as_slice())
    }

    /// Switch a unit on.
    pub fn on(&mut self, unit: Unit) -> Result<()> {
        self.send(Command::On(unit))
    }

    /// Switch a unit off.
    pub fn off(&mut self, unit: Unit) -> Result<()> {
        self.send(Command::Off(unit))
    }

    /// Dim a unit.
    pub fn dim(&mut self, unit: Unit, level: DimLevel) -> Result<()> {
        self.send(Command::Dim(unit, level))
    }

    /// Switch every paired unit on.
    pub fn group_on(&mut self) -> Result<()> {
        self.send(Command::GroupOn)
    }

    /// Switch every paired unit off.
    pub fn group_off(&mut self) -> Result<()> {
        self.send(Command::GroupOff)
    }

    /// Switch a unit off, on or to a dim level.
    pub fn switch(&mut self, unit: Unit, value: SwitchValue) -> Result<()> {
        self.send(Command::switch(unit, value))
    }

    /// Raw dispatch: `value` 0 is off, 1 is on, 2-100 is a dim level.
    ///
    /// Both arguments are validated before anything is transmitted.
    pub fn switch_raw(&mut self, unit: u8, value: u8) -> Result<()> {
        let unit = Unit::new(unit)?;
        let value = SwitchValue::from_raw(value)?;
        self.switch(unit, value)
    }
}

impl<P, D, L, I> NexaRemote<P, D, L, I>
where
    P: OutputPin,
    D: DelayNs + AsyncDelayNs,
    L: InterruptLock,
    I: OutputPin,
{
    /// Encode and transmit a command, awaiting the gaps between repetitions.
    pub async fn send_async(&mut self, command: Command) -> Result<()> {
        let pulses = self.encoder.encode(command);
        nexa_log!(debug, "nexa: sending {} pulses (async)", pulses.len());
        self.transmitter.transmit_async(pulses.as_slice()).await
    }

    /// Async [`switch`](Self::switch).
    pub async fn switch_async(&mut self, unit: Unit, value: SwitchValue) -> Result<()> {
        self.send_async(Command::switch(unit, value)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NexaError;
    use crate::protocol::constants::{
        COMMAND_FLAG_OFFSET, CONTROLLER_ID_LENGTH, CONTROLLER_ID_OFFSET, DEVICE_ID_LENGTH,
        DEVICE_ID_OFFSET, DIM_LENGTH, DIM_OFFSET, GROUP_FLAG_OFFSET, PULSE_LONG_US,
        PULSE_SHORT_US,
    };
    use crate::protocol::frame::WireSymbol;
    use crate::radio::mock::{Event, Line, MockDelay, MockLock, MockPin, MockRadio};

    const S: u16 = PULSE_SHORT_US;
    const L: u16 = PULSE_LONG_US;

    fn remote(radio: &MockRadio, config: RemoteConfig) -> NexaRemote<MockPin, MockDelay, MockLock> {
        NexaRemote::with_config(radio.tx_pin(), radio.delay(), config).with_lock(radio.lock())
    }

    fn unit(raw: u8) -> Unit {
        Unit::new(raw).unwrap()
    }

    /// Low periods of the first repetition's data pulses, as seen on the pin.
    fn first_repetition_lows(radio: &MockRadio, pulses: usize) -> Vec<u16> {
        radio
            .tx_waveform()
            .iter()
            .skip(2)
            .take(pulses * 2)
            .filter(|(level, _)| !level)
            .map(|&(_, us)| us as u16)
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = RemoteConfig::default();
        assert_eq!(config.controller_id.raw(), 1_234_567);
        assert_eq!(config.transmit_count, 10);
        assert_eq!(config.timing, Timing::PROTOCOL);
    }

    #[test]
    fn test_config_raw_controller_id() {
        let config = RemoteConfig::default().with_controller_id_raw(0).unwrap();
        assert_eq!(config.controller_id, ControllerId::DEFAULT);

        let config = RemoteConfig::default().with_controller_id_raw(77).unwrap();
        assert_eq!(config.controller_id.raw(), 77);

        assert!(RemoteConfig::default().with_controller_id_raw(1 << 26).is_err());
    }

    #[test]
    fn test_off_unit_5() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default());

        remote.off(unit(5)).unwrap();

        let pulses = remote.pulses();
        assert_eq!(pulses.len(), 64);
        assert_eq!(&pulses.as_slice()[54..56], &[S, L]);
        assert_eq!(&pulses.as_slice()[56..64], &[S, L, L, S, S, L, L, S]);
        assert_eq!(
            pulses.read_field(CONTROLLER_ID_OFFSET, CONTROLLER_ID_LENGTH),
            Some(1_234_567)
        );

        // What went out on the pin matches the buffer
        assert_eq!(first_repetition_lows(&radio, 64), pulses.as_slice());
        assert_eq!(radio.lock_count(), 10);
    }

    #[test]
    fn test_dim_unit_3_level_50() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default());

        remote.dim(unit(3), DimLevel::new(50).unwrap()).unwrap();

        let pulses = remote.pulses();
        assert_eq!(pulses.len(), 72);
        assert_eq!(&pulses.as_slice()[54..56], &[S, S]);
        assert_eq!(pulses.symbol(COMMAND_FLAG_OFFSET), Some(WireSymbol::DimSelector));
        assert_eq!(pulses.read_field(DEVICE_ID_OFFSET, DEVICE_ID_LENGTH), Some(3));
        assert_eq!(pulses.read_field(DIM_OFFSET, DIM_LENGTH), Some(8));
        assert_eq!(first_repetition_lows(&radio, 72), pulses.as_slice());
    }

    #[test]
    fn test_group_on() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default());

        remote.group_on().unwrap();

        let pulses = remote.pulses();
        assert_eq!(pulses.len(), 64);
        assert_eq!(pulses.read_field(DEVICE_ID_OFFSET, DEVICE_ID_LENGTH), Some(0));
        assert_eq!(pulses.symbol(GROUP_FLAG_OFFSET), Some(WireSymbol::One));
        assert_eq!(pulses.symbol(COMMAND_FLAG_OFFSET), Some(WireSymbol::One));
    }

    #[test]
    fn test_group_off() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default());

        remote.group_off().unwrap();

        let pulses = remote.pulses();
        assert_eq!(pulses.symbol(GROUP_FLAG_OFFSET), Some(WireSymbol::One));
        assert_eq!(pulses.symbol(COMMAND_FLAG_OFFSET), Some(WireSymbol::Zero));
    }

    #[test]
    fn test_same_command_twice_is_identical() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default().with_transmit_count(1));

        remote.on(unit(9)).unwrap();
        let first = remote.pulses().clone();
        let first_events = radio.events();
        radio.clear();

        remote.on(unit(9)).unwrap();
        assert_eq!(remote.pulses(), &first);
        assert_eq!(radio.events(), first_events);
    }

    #[test]
    fn test_switch_dispatch() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default().with_transmit_count(1));

        remote.switch_raw(4, 0).unwrap();
        assert_eq!(remote.pulses().symbol(COMMAND_FLAG_OFFSET), Some(WireSymbol::Zero));
        assert_eq!(remote.pulses().len(), 64);

        remote.switch_raw(4, 1).unwrap();
        assert_eq!(remote.pulses().symbol(COMMAND_FLAG_OFFSET), Some(WireSymbol::One));
        assert_eq!(remote.pulses().len(), 64);

        remote.switch_raw(4, 100).unwrap();
        assert_eq!(
            remote.pulses().symbol(COMMAND_FLAG_OFFSET),
            Some(WireSymbol::DimSelector)
        );
        assert_eq!(remote.pulses().read_field(DIM_OFFSET, DIM_LENGTH), Some(15));

        remote.switch(unit(4), SwitchValue::On).unwrap();
        assert_eq!(remote.pulses().symbol(COMMAND_FLAG_OFFSET), Some(WireSymbol::One));
    }

    #[test]
    fn test_invalid_input_sends_nothing() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default());

        let err = remote.switch_raw(16, 1).unwrap_err();
        assert!(err.is_encoding());
        let err = remote.switch_raw(1, 101).unwrap_err();
        match err {
            NexaError::Encoding(e) => assert!(e.is_dim_level_out_of_range()),
            NexaError::Output(_) => panic!("expected encoding error"),
        }

        assert!(radio.events().is_empty());
        assert!(remote.pulses().is_empty());
    }

    #[test]
    fn test_custom_controller_and_count() {
        let radio = MockRadio::new();
        let config = RemoteConfig::default()
            .with_controller_id(ControllerId::new(0x2AA_AAAA).unwrap())
            .with_transmit_count(3);
        let mut remote = remote(&radio, config);

        remote.on(unit(1)).unwrap();

        assert_eq!(remote.controller_id().raw(), 0x2AA_AAAA);
        assert_eq!(
            remote.pulses().read_field(CONTROLLER_ID_OFFSET, CONTROLLER_ID_LENGTH),
            Some(0x2AA_AAAA)
        );
        assert_eq!(radio.lock_count(), 3);
        assert_eq!(
            radio.elapsed_us(),
            remote.transmitter().transmission_duration_us(remote.pulses().as_slice())
        );
    }

    #[test]
    fn test_indicator() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default().with_transmit_count(2))
            .with_indicator(radio.indicator_pin());

        remote.group_off().unwrap();

        let led_on = radio
            .events()
            .iter()
            .filter(|e| **e == Event::Level(Line::Indicator, true))
            .count();
        assert_eq!(led_on, 2);
        let (_, _, _, indicator) = remote.release();
        assert!(indicator.is_some());
    }

    #[test]
    fn test_encode_only() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default());

        let len = remote.encode(Command::GroupOn).len();
        assert_eq!(len, 64);
        assert!(radio.events().is_empty());
    }

    #[test]
    fn test_async_switch() {
        let radio = MockRadio::new();
        let mut remote = remote(&radio, RemoteConfig::default().with_transmit_count(2));

        embassy_futures::block_on(remote.switch_async(unit(6), SwitchValue::Off)).unwrap();

        assert_eq!(remote.pulses().read_field(DEVICE_ID_OFFSET, DEVICE_ID_LENGTH), Some(6));
        let awaited = radio
            .events()
            .iter()
            .filter(|e| matches!(e, Event::AsyncDelay(_)))
            .count();
        assert_eq!(awaited, 2);
    }
}
