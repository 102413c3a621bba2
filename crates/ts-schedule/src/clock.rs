//! Time sources for budget accounting.

use std::time::Instant;

/// A running microsecond counter.  Only differences are meaningful.
pub trait BudgetClock {
    fn now_us(&mut self) -> u64;
}

/// Monotonic wall-clock time.
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl BudgetClock for WallClock {
    #[inline]
    fn now_us(&mut self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

/// A clock that never advances: the budget is never spent, so only
/// `max_full_updates` limits a frame.  Makes runs reproducible.
#[derive(Default, Clone, Copy)]
pub struct FrozenClock;

impl BudgetClock for FrozenClock {
    #[inline]
    fn now_us(&mut self) -> u64 {
        0
    }
}
