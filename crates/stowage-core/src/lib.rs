//! stowage-core: shared vocabulary for the stowage cache.
//!
//! Core carries only types, configuration, and interfaces. Concrete clock
//! implementations and the cache machinery live downstream (`stowage-store`,
//! `stowage-engine`) so any crate can depend on the API without pulling in
//! the registry or eviction logic.

pub mod clock;
pub mod config;
pub mod error;
pub mod prelude;
pub mod pressure;
pub mod types;

pub use clock::Clock;
pub use config::CacheConfig;
pub use error::{Error, Result};
pub use pressure::{MaintenanceDecision, MemoryInfo, PressureThresholds};
pub use types::Tick;
