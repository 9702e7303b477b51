//! Memory pressure classification.
//!
//! Pure computation over the total/used counters; no side effects. The
//! thresholds are phrased against *available* memory relative to total, not
//! used memory: `is_low` means less than 15% of the budget is still free.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fractional watermarks for pressure classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureThresholds {
    /// `available / total` below this is "low".
    pub low: f64,
    /// `available / total` below this is "critical". Must be below `low`.
    pub critical: f64,
}

impl Default for PressureThresholds {
    fn default() -> Self {
        Self {
            low: 0.15,
            critical: 0.05,
        }
    }
}

impl PressureThresholds {
    pub fn validate(&self) -> Result<()> {
        let in_range = |w: f64| w > 0.0 && w < 1.0;
        if !in_range(self.low) || !in_range(self.critical) {
            return Err(Error::Config(format!(
                "pressure watermarks must be in (0, 1): low={}, critical={}",
                self.low, self.critical
            )));
        }
        if self.critical >= self.low {
            return Err(Error::Config(format!(
                "critical watermark ({}) must be below low watermark ({})",
                self.critical, self.low
            )));
        }
        Ok(())
    }
}

/// Snapshot of the cache's memory situation. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    /// `used / total`, in [0, 1].
    pub usage_fraction: f64,
    pub is_low: bool,
    pub is_critical: bool,
}

impl MemoryInfo {
    /// Classify `used` bytes against a `total` budget.
    ///
    /// `used` is clamped to `total`: the ledger counts declared sizes, and a
    /// caller that over-registers should read 100% usage, not a panic.
    pub fn classify(total_bytes: u64, used_bytes: u64, thresholds: PressureThresholds) -> Self {
        let used = used_bytes.min(total_bytes);
        let available = total_bytes - used;
        let (usage_fraction, available_fraction) = if total_bytes == 0 {
            (1.0, 0.0)
        } else {
            (
                used as f64 / total_bytes as f64,
                available as f64 / total_bytes as f64,
            )
        };
        Self {
            total_bytes,
            used_bytes: used,
            available_bytes: available,
            usage_fraction,
            is_low: available_fraction < thresholds.low,
            is_critical: available_fraction < thresholds.critical,
        }
    }
}

/// What periodic maintenance should do this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaintenanceDecision {
    /// Not due yet, or no pressure found.
    None,
    /// Memory is low: run a normal sweep.
    Normal,
    /// Memory is critical: run an aggressive sweep.
    Aggressive,
}

impl MaintenanceDecision {
    /// Classify a sampled `MemoryInfo`. Critical wins over low.
    pub fn from_info(info: &MemoryInfo) -> Self {
        if info.is_critical {
            MaintenanceDecision::Aggressive
        } else if info.is_low {
            MaintenanceDecision::Normal
        } else {
            MaintenanceDecision::None
        }
    }
}
