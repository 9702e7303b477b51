//! Convenient re-exports for downstream crates.

pub use crate::clock::Clock;
pub use crate::config::CacheConfig;
pub use crate::error::{Error, Result};
pub use crate::pressure::{MaintenanceDecision, MemoryInfo, PressureThresholds};
pub use crate::types::{categories, Tick};
