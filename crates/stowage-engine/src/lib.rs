//! stowage-engine: the policy half of the cache.
//!
//! `stowage-store` owns the records; this crate decides when they die. It
//! provides the eviction sweep, the periodic pressure monitor, the concrete
//! clocks, and [`CacheManager`], the composition root every producer and the
//! host scheduler talk to.
//!
//! Everything here is synchronous and single-threaded by design: a
//! multi-threaded host must serialize access to the manager externally.

pub mod clock;
pub mod manager;
pub mod monitor;
pub mod stats;
pub mod sweep;

pub use clock::{ManualClock, SystemClock};
pub use manager::CacheManager;
pub use monitor::PressureMonitor;
pub use stats::{CacheStats, CategoryStats};
pub use sweep::{run_sweep, SweepMode, SweepOutcome};
