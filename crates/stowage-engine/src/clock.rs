//! Concrete clocks for the `stowage_core::Clock` interface.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use stowage_core::clock::Clock;
use stowage_core::types::Tick;

/// Millisecond ticks measured from construction time.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Tick {
        self.origin.elapsed().as_millis() as Tick
    }
}

/// Hand-driven clock for tests and deterministic scenario replays.
///
/// Clones share the same underlying tick, so a copy can keep advancing time
/// after another copy has been boxed into a manager.
#[derive(Clone, Default)]
pub struct ManualClock {
    ticks: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(tick: Tick) -> Self {
        let clock = Self::default();
        clock.set(tick);
        clock
    }

    pub fn advance(&self, delta: Tick) {
        self.ticks.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn set(&self, tick: Tick) {
        self.ticks.store(tick, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        self.ticks.load(Ordering::Relaxed)
    }
}
