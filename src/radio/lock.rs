//! Preemption lock around the timing-critical part of a repetition.
//!
//! This module provides the `InterruptLock` trait that abstracts how the
//! transmitter keeps interrupts and other tasks from stretching pulses,
//! enabling:
//! - Testability through mock implementations that record lock transitions
//! - Platform choice: the global `critical-section` implementation by default,
//!   anything with acquire/release semantics otherwise
//!
//! The transmitter only ever holds the lock through a [`LockGuard`], so the
//! lock is released on every exit path, including a pin error in the middle
//! of a frame.
//!
//! ## Example
//!
//! ```rust,ignore
//! use nexa_pico::radio::lock::{GlobalCriticalSection, LockGuard};
//!
//! let mut lock = GlobalCriticalSection;
//! {
//!     let _guard = LockGuard::new(&mut lock);
//!     // latch + pulse train + latch
//! }
//! // inter-repetition gap runs preemptible
//! ```

use core::fmt;

/// Suppresses preemption for a bounded duration.
///
/// Implementations must tolerate `acquire`/`release` pairs nested in LIFO
/// order, which is how [`LockGuard`] uses them.
pub trait InterruptLock {
    /// State handed from `acquire` to the matching `release`.
    type Token;

    /// Enter the locked region.
    fn acquire(&mut self) -> Self::Token;

    /// Leave the locked region.
    ///
    /// # Safety
    ///
    /// `token` must come from the most recent `acquire` on this lock that has
    /// not been released yet.
    unsafe fn release(&mut self, token: Self::Token);
}

/// Scoped lock acquisition, released on drop.
pub struct LockGuard<'a, L: InterruptLock> {
    lock: &'a mut L,
    token: Option<L::Token>,
}

impl<'a, L: InterruptLock> LockGuard<'a, L> {
    /// Acquire `lock` until the guard is dropped.
    #[inline(always)]
    pub fn new(lock: &'a mut L) -> Self {
        let token = lock.acquire();
        Self {
            lock,
            token: Some(token),
        }
    }
}

impl<L: InterruptLock> Drop for LockGuard<'_, L> {
    #[inline(always)]
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            // SAFETY: the token was produced by `acquire` in `new`, and the guard
            // holds the lock mutably borrowed, so no other acquisition on this
            // lock can have started since.
            unsafe { self.lock.release(token) };
        }
    }
}

impl<L: InterruptLock> fmt::Debug for LockGuard<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockGuard")
            .field("held", &self.token.is_some())
            .finish()
    }
}

/// Lock backed by the global [`critical_section`] implementation.
///
/// On single-core Cortex-M this masks interrupts; on RP2040/RP235x with
/// `embassy-rp`'s `critical-section-impl` it also takes the inter-core
/// spinlock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlobalCriticalSection;

impl InterruptLock for GlobalCriticalSection {
    type Token = critical_section::RestoreState;

    #[inline(always)]
    fn acquire(&mut self) -> Self::Token {
        // SAFETY: every acquire is paired with exactly one `release` of the
        // returned state through `LockGuard`, in LIFO order.
        unsafe { critical_section::acquire() }
    }

    #[inline(always)]
    unsafe fn release(&mut self, token: Self::Token) {
        // SAFETY: the caller guarantees `token` is from the matching, most
        // recent `acquire`.
        unsafe { critical_section::release(token) };
    }
}
