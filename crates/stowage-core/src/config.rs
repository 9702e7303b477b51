//! Cache configuration that downstream crates can serialize/deserialize.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pressure::PressureThresholds;
use crate::types::{categories, Tick};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Total memory budget (in bytes) shared by every category. The cache
    /// never allocates past what callers hand it; this is the denominator
    /// for pressure classification and sweep targets.
    pub total_budget_bytes: u64,

    /// Low/critical pressure watermarks (fractions of available/total).
    pub thresholds: PressureThresholds,

    /// Minimum ticks between periodic maintenance checks.
    pub maintenance_interval: Tick,

    /// Normal sweeps only consider records untouched for this many ticks.
    pub normal_age: Tick,

    /// Aggressive sweeps use this shorter staleness cutoff.
    pub aggressive_age: Tick,

    /// Fraction of the total budget a normal sweep tries to reclaim.
    pub normal_target_fraction: f64,

    /// Fraction of the total budget an aggressive sweep tries to reclaim.
    pub aggressive_target_fraction: f64,

    /// Initial per-category soft limits (bytes). Categories absent from the
    /// map are unlimited.
    pub category_limits: BTreeMap<String, u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let mut category_limits = BTreeMap::new();
        category_limits.insert(categories::TEXTURES.to_string(), 16 * 1024 * 1024);
        category_limits.insert(categories::SOUNDS.to_string(), 8 * 1024 * 1024);
        category_limits.insert(categories::ANIMATIONS.to_string(), 4 * 1024 * 1024);
        category_limits.insert(categories::SCRIPTS.to_string(), 2 * 1024 * 1024);

        Self {
            total_budget_bytes: 64 * 1024 * 1024, // 64 MiB default
            thresholds: PressureThresholds::default(),
            maintenance_interval: 30_000,
            normal_age: 60_000,
            aggressive_age: 10_000,
            normal_target_fraction: 0.125,
            aggressive_target_fraction: 0.25,
            category_limits,
        }
    }
}

impl CacheConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `STOWAGE_TOTAL_BUDGET_BYTES`: total budget in bytes
    /// - `STOWAGE_LOW_WATERMARK` / `STOWAGE_CRITICAL_WATERMARK`: pressure fractions
    /// - `STOWAGE_MAINTENANCE_INTERVAL`: ticks between maintenance checks
    /// - `STOWAGE_NORMAL_AGE` / `STOWAGE_AGGRESSIVE_AGE`: sweep staleness cutoffs
    /// - `STOWAGE_NORMAL_TARGET_FRACTION` / `STOWAGE_AGGRESSIVE_TARGET_FRACTION`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("STOWAGE_TOTAL_BUDGET_BYTES") {
            if let Ok(v) = s.parse::<u64>() {
                cfg.total_budget_bytes = v;
            }
        }

        if let Ok(s) = std::env::var("STOWAGE_LOW_WATERMARK") {
            if let Ok(v) = s.parse::<f64>() {
                cfg.thresholds.low = v;
            }
        }

        if let Ok(s) = std::env::var("STOWAGE_CRITICAL_WATERMARK") {
            if let Ok(v) = s.parse::<f64>() {
                cfg.thresholds.critical = v;
            }
        }

        if let Ok(s) = std::env::var("STOWAGE_MAINTENANCE_INTERVAL") {
            if let Ok(v) = s.parse::<Tick>() {
                cfg.maintenance_interval = v;
            }
        }

        if let Ok(s) = std::env::var("STOWAGE_NORMAL_AGE") {
            if let Ok(v) = s.parse::<Tick>() {
                cfg.normal_age = v;
            }
        }

        if let Ok(s) = std::env::var("STOWAGE_AGGRESSIVE_AGE") {
            if let Ok(v) = s.parse::<Tick>() {
                cfg.aggressive_age = v;
            }
        }

        if let Ok(s) = std::env::var("STOWAGE_NORMAL_TARGET_FRACTION") {
            if let Ok(v) = s.parse::<f64>() {
                cfg.normal_target_fraction = v;
            }
        }

        if let Ok(s) = std::env::var("STOWAGE_AGGRESSIVE_TARGET_FRACTION") {
            if let Ok(v) = s.parse::<f64>() {
                cfg.aggressive_target_fraction = v;
            }
        }

        cfg
    }

    /// Reject configurations the cache cannot run under.
    pub fn validate(&self) -> Result<()> {
        if self.total_budget_bytes == 0 {
            return Err(Error::Config("total budget must be non-zero".into()));
        }
        self.thresholds.validate()?;
        for (name, fraction) in [
            ("normal_target_fraction", self.normal_target_fraction),
            ("aggressive_target_fraction", self.aggressive_target_fraction),
        ] {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(Error::Config(format!(
                    "{name} must be in (0, 1], got {fraction}"
                )));
            }
        }
        if self.maintenance_interval == 0 {
            return Err(Error::Config("maintenance interval must be non-zero".into()));
        }
        Ok(())
    }

    /// Soft limit for a category, if configured.
    pub fn limit_of(&self, category: &str) -> Option<u64> {
        self.category_limits.get(category).copied()
    }
}
