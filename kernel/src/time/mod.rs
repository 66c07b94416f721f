//! Monotonic tick clock.
//!
//! The scheduler treats time as a logical tick counter that only the timer
//! interrupt path advances. Keeping the counter in an injectable value
//! (rather than a module-private static) makes decision cycles a
//! deterministic function of their inputs.

use core::sync::atomic::{AtomicU64, Ordering};

/// Monotonic tick counter. One instance lives for the kernel's entire run.
pub struct Clock {
    ticks: AtomicU64,
}

impl Clock {
    pub const fn new() -> Self {
        Clock {
            ticks: AtomicU64::new(0),
        }
    }

    /// Advance by one tick. Invoked from the timer-interrupt stub; returns
    /// the new tick count.
    #[inline]
    pub fn tick(&self) -> u64 {
        self.ticks.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Raw tick counter. Read-only from the scheduler's perspective.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}
