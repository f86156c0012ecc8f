//! Mock radio hardware for testing.
//!
//! This module provides mock implementations of the output pin, delay and
//! lock collaborators that all append to one shared timeline, so tests can
//! check pulse widths, lock placement and total blocking time without a
//! transmitter module or an oscilloscope.
//!
//! ## Example
//!
//! ```rust,ignore
//! use nexa_pico::radio::mock::MockRadio;
//! use nexa_pico::{NexaRemote, RemoteConfig, Unit};
//!
//! let radio = MockRadio::new();
//! let mut remote = NexaRemote::with_config(radio.tx_pin(), radio.delay(), RemoteConfig::default())
//!     .with_lock(radio.lock());
//!
//! remote.on(Unit::new(1)?)?;
//! assert_eq!(radio.lock_count(), 10);
//! ```

use crate::radio::lock::InterruptLock;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

/// Output line of the mock radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// RF transmitter data pin
    Tx,
    /// Indicator LED
    Indicator,
}

/// One entry of the mock timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A line was driven to a level (`true` = high)
    Level(Line, bool),
    /// Blocking delay in microseconds
    Delay(u32),
    /// Awaited (preemptible) delay in microseconds
    AsyncDelay(u32),
    /// Critical section entered
    Lock,
    /// Critical section left
    Unlock,
}

#[derive(Debug, Default)]
struct Timeline {
    events: Vec<Event>,
    tx_writes: usize,
    tx_fail_after: Option<usize>,
    indicator_fails: bool,
}

/// Shared timeline handing out mock collaborators.
///
/// Clones share the same timeline.
#[derive(Debug, Clone, Default)]
pub struct MockRadio {
    timeline: Rc<RefCell<Timeline>>,
}

impl MockRadio {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transmitter data pin.
    pub fn tx_pin(&self) -> MockPin {
        MockPin {
            radio: self.clone(),
            line: Line::Tx,
        }
    }

    /// Indicator pin.
    pub fn indicator_pin(&self) -> MockPin {
        MockPin {
            radio: self.clone(),
            line: Line::Indicator,
        }
    }

    /// Delay provider (blocking and async).
    pub fn delay(&self) -> MockDelay {
        MockDelay { radio: self.clone() }
    }

    /// Preemption lock.
    pub fn lock(&self) -> MockLock {
        MockLock { radio: self.clone() }
    }

    /// Make the data pin fail once it has been written `writes` times.
    pub fn fail_tx_after(&self, writes: usize) {
        self.timeline.borrow_mut().tx_fail_after = Some(writes);
    }

    /// Make every write to the indicator pin fail.
    pub fn fail_indicator(&self) {
        self.timeline.borrow_mut().indicator_fails = true;
    }

    /// Everything recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.timeline.borrow().events.clone()
    }

    /// Forget recorded events (failure injection is kept).
    pub fn clear(&self) {
        let mut timeline = self.timeline.borrow_mut();
        timeline.events.clear();
        timeline.tx_writes = 0;
    }

    /// Total delay time, blocking and awaited.
    pub fn elapsed_us(&self) -> u64 {
        self.timeline
            .borrow()
            .events
            .iter()
            .map(|event| match event {
                Event::Delay(us) | Event::AsyncDelay(us) => u64::from(*us),
                _ => 0,
            })
            .sum()
    }

    /// Number of critical sections entered.
    pub fn lock_count(&self) -> usize {
        self.count(|event| *event == Event::Lock)
    }

    /// Number of critical sections left.
    pub fn unlock_count(&self) -> usize {
        self.count(|event| *event == Event::Unlock)
    }

    /// Data pin waveform as `(level, duration)` segments.
    ///
    /// Every write to the data pin opens a segment; delays extend the open
    /// segment. Delays before the first write are not part of the waveform.
    pub fn tx_waveform(&self) -> Vec<(bool, u64)> {
        let mut segments: Vec<(bool, u64)> = Vec::new();
        for event in &self.timeline.borrow().events {
            match *event {
                Event::Level(Line::Tx, level) => segments.push((level, 0)),
                Event::Delay(us) | Event::AsyncDelay(us) => {
                    if let Some(last) = segments.last_mut() {
                        last.1 += u64::from(us);
                    }
                }
                _ => {}
            }
        }
        segments
    }

    fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.timeline
            .borrow()
            .events
            .iter()
            .filter(|event| predicate(event))
            .count()
    }

    fn record(&self, event: Event) {
        self.timeline.borrow_mut().events.push(event);
    }
}

/// Error returned by a failing [`MockPin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Output pin recording level changes.
#[derive(Debug, Clone)]
pub struct MockPin {
    radio: MockRadio,
    line: Line,
}

impl MockPin {
    fn write(&mut self, level: bool) -> Result<(), MockPinError> {
        let mut timeline = self.radio.timeline.borrow_mut();
        if self.line == Line::Tx {
            let writes = timeline.tx_writes;
            if timeline.tx_fail_after.is_some_and(|limit| writes >= limit) {
                return Err(MockPinError);
            }
            timeline.tx_writes += 1;
        } else if timeline.indicator_fails {
            return Err(MockPinError);
        }
        timeline.events.push(Event::Level(self.line, level));
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = MockPinError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

/// Delay recording requested durations instead of sleeping.
#[derive(Debug, Clone)]
pub struct MockDelay {
    radio: MockRadio,
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.radio.record(Event::Delay(ns.div_ceil(1000)));
    }

    fn delay_us(&mut self, us: u32) {
        self.radio.record(Event::Delay(us));
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.radio.record(Event::AsyncDelay(ns.div_ceil(1000)));
    }

    async fn delay_us(&mut self, us: u32) {
        self.radio.record(Event::AsyncDelay(us));
    }
}

/// Lock recording enter/leave transitions.
#[derive(Debug, Clone)]
pub struct MockLock {
    radio: MockRadio,
}

impl InterruptLock for MockLock {
    type Token = ();

    fn acquire(&mut self) {
        self.radio.record(Event::Lock);
    }

    unsafe fn release(&mut self, _token: ()) {
        self.radio.record(Event::Unlock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;

    #[test]
    fn test_shared_timeline() {
        let radio = MockRadio::new();
        let mut pin = radio.tx_pin();
        let mut delay = radio.delay();

        pin.set_high().unwrap();
        delay.delay_us(270);
        pin.set_low().unwrap();
        delay.delay_us(280);

        assert_eq!(
            radio.events(),
            vec![
                Event::Level(Line::Tx, true),
                Event::Delay(270),
                Event::Level(Line::Tx, false),
                Event::Delay(280),
            ]
        );
        assert_eq!(radio.elapsed_us(), 550);
        assert_eq!(radio.tx_waveform(), vec![(true, 270), (false, 280)]);
    }

    #[test]
    fn test_indicator_does_not_split_segments() {
        let radio = MockRadio::new();
        let mut tx = radio.tx_pin();
        let mut led = radio.indicator_pin();
        let mut delay = radio.delay();

        tx.set_low().unwrap();
        delay.delay_us(100);
        led.set_high().unwrap();
        delay.delay_us(50);

        assert_eq!(radio.tx_waveform(), vec![(false, 150)]);
    }

    #[test]
    fn test_fail_tx_after() {
        let radio = MockRadio::new();
        radio.fail_tx_after(2);
        let mut pin = radio.tx_pin();

        assert!(pin.set_high().is_ok());
        assert!(pin.set_low().is_ok());
        assert_eq!(pin.set_high(), Err(MockPinError));

        // The indicator is unaffected
        assert!(radio.indicator_pin().set_high().is_ok());
    }

    #[test]
    fn test_fail_indicator() {
        let radio = MockRadio::new();
        radio.fail_indicator();

        assert_eq!(radio.indicator_pin().set_high(), Err(MockPinError));
        assert!(radio.tx_pin().set_high().is_ok());
        assert_eq!(radio.events(), vec![Event::Level(Line::Tx, true)]);
    }

    #[test]
    fn test_lock_counts() {
        let radio = MockRadio::new();
        let mut lock = radio.lock();
        {
            let _guard = crate::radio::lock::LockGuard::new(&mut lock);
        }
        assert_eq!(radio.lock_count(), 1);
        assert_eq!(radio.unlock_count(), 1);
        assert_eq!(radio.events(), vec![Event::Lock, Event::Unlock]);
    }

    #[test]
    fn test_async_delay() {
        let radio = MockRadio::new();
        let mut delay = radio.delay();
        embassy_futures::block_on(embedded_hal_async::delay::DelayNs::delay_us(&mut delay, 9500));
        assert_eq!(radio.events(), vec![Event::AsyncDelay(9500)]);
    }

    #[test]
    fn test_clear() {
        let radio = MockRadio::new();
        radio.delay().delay_us(10);
        radio.clear();
        assert!(radio.events().is_empty());
        assert_eq!(radio.elapsed_us(), 0);
    }
}
