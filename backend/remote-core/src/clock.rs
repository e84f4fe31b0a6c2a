//! Monotonic millisecond clock.

use std::time::Instant;

/// Milliseconds since an arbitrary start point. Wraps after ~49 days, so
/// callers compare with `wrapping_sub`.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u32;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        // Truncation is the wrap-around.
        self.start.elapsed().as_millis() as u32
    }
}

/// Whether at least `interval_ms` has passed between `since_ms` and `now_ms`.
pub fn elapsed_at_least(now_ms: u32, since_ms: u32, interval_ms: u32) -> bool {
    now_ms.wrapping_sub(since_ms) >= interval_ms
}
