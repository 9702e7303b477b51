//! stowage: budget-constrained, category-partitioned resource cache with
//! time-based eviction.
//!
//! Facade crate re-exporting the public API of the workspace members. Most
//! embedders only need [`CacheManager`] and [`CacheConfig`].

pub use stowage_core::{
    CacheConfig, Clock, MaintenanceDecision, MemoryInfo, PressureThresholds, Tick,
};
pub use stowage_engine::{
    run_sweep, CacheManager, CacheStats, CategoryStats, ManualClock, PressureMonitor, SweepMode,
    SweepOutcome, SystemClock,
};
pub use stowage_store::{CategoryLedger, ResourceHandle, ResourceRegistry};
