//! Elapsed-time sources for the timing combinators.
//!
//! Timing nodes never sleep; they compare a [`Timer`] against their duration
//! on every `update`. The clock behind the timer is injectable so tests and
//! deterministic embedders can drive time by hand with [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Monotonic millisecond time source.
pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary, fixed origin. Never decreases.
    fn now_ms(&self) -> u64;
}

/// Shared handle to a clock, as stored by timing nodes.
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Process-wide system clock used by the timing constructors that do
    /// not take an explicit clock.
    pub fn shared() -> SharedClock {
        static CLOCK: OnceLock<SharedClock> = OnceLock::new();
        Arc::clone(CLOCK.get_or_init(|| Arc::new(SystemClock::new())))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock.
///
/// Clones share the same reading, so a test can keep one handle and give
/// another to the tree.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock reading 0 ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Sets the reading to `ms`, which must not be behind the current reading.
    pub fn set(&self, ms: u64) {
        self.now.fetch_max(ms, Ordering::SeqCst);
    }

    /// Returns this clock as a [`SharedClock`].
    pub fn shared(&self) -> SharedClock {
        Arc::new(self.clone())
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Restartable stopwatch over a [`Clock`].
#[derive(Clone)]
pub struct Timer {
    clock: SharedClock,
    start: u64,
}

impl Timer {
    /// Creates a timer started now.
    pub fn new(clock: SharedClock) -> Self {
        let start = clock.now_ms();
        Self { clock, start }
    }

    /// Restarts the timer from the current reading.
    pub fn restart(&mut self) {
        self.start = self.clock.now_ms();
    }

    /// Milliseconds since the last restart.
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.now_ms().saturating_sub(self.start)
    }
}

impl core::fmt::Debug for Timer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timer")
            .field("start", &self.start)
            .field("elapsed_ms", &self.elapsed_ms())
            .finish()
    }
}
