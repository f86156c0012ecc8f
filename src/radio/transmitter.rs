//! Pulse train transmitter.
//!
//! Plays a pulse buffer back on the data pin. One repetition is:
//!
//! ```text
//! [lock] indicator on
//!        latch     high 280, low 2675
//!        pulse i   high 270, low buffer[i]      for every pulse
//!        latch     high 280, low 2675
//!        indicator off [unlock]
//! gap    9500 (preemptible)
//! ```
//!
//! The frame is repeated `transmit_count` times. Receivers have no way to
//! acknowledge, so repetition is the only reliability mechanism.
//!
//! A repetition, once started, runs to completion. The only early exit is a
//! pin error, after which the lock is released and the pins are driven low on
//! a best-effort basis.

use crate::error::{NexaError, Result};
use crate::protocol::timing::Timing;
use crate::radio::lock::{GlobalCriticalSection, InterruptLock, LockGuard};
use crate::radio::NoIndicator;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin};
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

/// Drives the RF data pin (and optional indicator) with exact pulse timing.
///
/// # Type Parameters
///
/// - `P` - data pin of the 433 MHz transmitter module
/// - `D` - microsecond delay provider
/// - `L` - preemption lock, [`GlobalCriticalSection`] by default
/// - `I` - indicator pin, [`NoIndicator`] by default
#[derive(Debug)]
pub struct Transmitter<P, D, L = GlobalCriticalSection, I = NoIndicator> {
    tx: P,
    delay: D,
    lock: L,
    indicator: Option<I>,
    timing: Timing,
    transmit_count: u8,
}

impl<P, D> Transmitter<P, D> {
    /// Create a transmitter using the global critical section and no indicator.
    pub fn new(tx: P, delay: D, timing: Timing, transmit_count: u8) -> Self {
        Self {
            tx,
            delay,
            lock: GlobalCriticalSection,
            indicator: None,
            timing,
            transmit_count,
        }
    }
}

impl<P, D, L, I> Transmitter<P, D, L, I> {
    /// Replace the preemption lock.
    pub fn with_lock<L2: InterruptLock>(self, lock: L2) -> Transmitter<P, D, L2, I> {
        Transmitter {
            tx: self.tx,
            delay: self.delay,
            lock,
            indicator: self.indicator,
            timing: self.timing,
            transmit_count: self.transmit_count,
        }
    }

    /// Add an indicator pin, held high while a repetition is on air.
    pub fn with_indicator<I2: OutputPin>(self, indicator: I2) -> Transmitter<P, D, L, I2> {
        Transmitter {
            tx: self.tx,
            delay: self.delay,
            lock: self.lock,
            indicator: Some(indicator),
            timing: self.timing,
            transmit_count: self.transmit_count,
        }
    }

    /// Timing set in use.
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Repetitions per transmission.
    pub const fn transmit_count(&self) -> u8 {
        self.transmit_count
    }

    /// Change the repetitions per transmission.
    pub fn set_transmit_count(&mut self, transmit_count: u8) {
        self.transmit_count = transmit_count;
    }

    /// Time a call to [`transmit`](Self::transmit) blocks for, gaps included.
    pub fn transmission_duration_us(&self, pulses: &[u16]) -> u64 {
        let high = u64::from(self.timing.pulse_high_us);
        let body: u64 = pulses.iter().map(|&low| high + u64::from(low)).sum();
        let repetition = 2 * u64::from(self.timing.latch_us())
            + body
            + u64::from(self.timing.repeat_gap_us);
        u64::from(self.transmit_count) * repetition
    }

    /// Give back the owned peripherals.
    pub fn release(self) -> (P, D, L, Option<I>) {
        (self.tx, self.delay, self.lock, self.indicator)
    }
}

impl<P, D, L, I> Transmitter<P, D, L, I>
where
    P: OutputPin,
    D: DelayNs,
    L: InterruptLock,
    I: OutputPin,
{
    /// Send `pulses` `transmit_count` times, blocking for the whole transmission.
    ///
    /// The gap between repetitions is a blocking delay; use
    /// [`transmit_async`](Self::transmit_async) to let an executor run other
    /// tasks during it.
    pub fn transmit(&mut self, pulses: &[u16]) -> Result<()> {
        for repetition in 0..self.transmit_count {
            nexa_log!(trace, "nexa: repetition {}", repetition);
            if let Err(e) = self.emit_repetition(pulses) {
                self.abort();
                return Err(e);
            }
            DelayNs::delay_us(&mut self.delay, u32::from(self.timing.repeat_gap_us));
        }
        Ok(())
    }

    /// Emit one latch/frame/latch sequence under the lock.
    fn emit_repetition(&mut self, pulses: &[u16]) -> Result<()> {
        let Self {
            tx,
            delay,
            lock,
            indicator,
            timing,
            ..
        } = self;

        let _guard = LockGuard::new(lock);

        if let Some(led) = indicator.as_mut() {
            led.set_high().map_err(|e| NexaError::indicator(e.kind()))?;
        }

        emit_pulse(tx, delay, timing.latch_high_us, timing.latch_low_us)?;
        for &low in pulses {
            emit_pulse(tx, delay, timing.pulse_high_us, low)?;
        }
        emit_pulse(tx, delay, timing.latch_high_us, timing.latch_low_us)?;

        if let Some(led) = indicator.as_mut() {
            led.set_low().map_err(|e| NexaError::indicator(e.kind()))?;
        }
        Ok(())
    }

    /// Leave the carrier off after a failed repetition.
    fn abort(&mut self) {
        nexa_log!(warn, "nexa: pin failure, transmission aborted");
        let _ = self.tx.set_low();
        if let Some(led) = self.indicator.as_mut() {
            let _ = led.set_low();
        }
    }
}

impl<P, D, L, I> Transmitter<P, D, L, I>
where
    P: OutputPin,
    D: DelayNs + AsyncDelayNs,
    L: InterruptLock,
    I: OutputPin,
{
    /// Like [`transmit`](Self::transmit), but the gap between repetitions is
    /// awaited, yielding to the executor.
    ///
    /// Repetitions themselves still block. Dropping the future between
    /// repetitions only reduces the number of repetitions sent.
    pub async fn transmit_async(&mut self, pulses: &[u16]) -> Result<()> {
        for repetition in 0..self.transmit_count {
            nexa_log!(trace, "nexa: repetition {}", repetition);
            if let Err(e) = self.emit_repetition(pulses) {
                self.abort();
                return Err(e);
            }
            AsyncDelayNs::delay_us(&mut self.delay, u32::from(self.timing.repeat_gap_us)).await;
        }
        Ok(())
    }
}

/// High for `high_us`, then low for `low_us`.
#[inline(always)]
fn emit_pulse<P: OutputPin, D: DelayNs>(
    tx: &mut P,
    delay: &mut D,
    high_us: u16,
    low_us: u16,
) -> Result<()> {
    tx.set_high().map_err(|e| NexaError::tx_pin(e.kind()))?;
    delay.delay_us(u32::from(high_us));
    tx.set_low().map_err(|e| NexaError::tx_pin(e.kind()))?;
    delay.delay_us(u32::from(low_us));
    Ok(())
}
