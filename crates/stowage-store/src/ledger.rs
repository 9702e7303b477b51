//! Per-category soft limits and running usage counters.
//!
//! Every registry insert/remove must be mirrored here by the caller in the
//! same operation; the ledger itself never scans records. Limits are
//! advisory pressure, not a hard quota: tightening a limit below current
//! usage changes nothing until the next threshold test.

use std::collections::BTreeMap;

/// Category accounting. Absence of a limit entry means unlimited.
#[derive(Debug, Default)]
pub struct CategoryLedger {
    limits: BTreeMap<String, u64>,
    usage: BTreeMap<String, u64>,
    total_used: u64,
}

impl CategoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed initial limits, typically from `CacheConfig::category_limits`.
    pub fn with_limits(limits: BTreeMap<String, u64>) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Overwrite (or clear, with `None`) a category's soft limit. Idempotent.
    pub fn set_limit(&mut self, category: &str, max_bytes: Option<u64>) {
        match max_bytes {
            Some(bytes) => {
                self.limits.insert(category.to_string(), bytes);
            }
            None => {
                self.limits.remove(category);
            }
        }
    }

    pub fn limit_of(&self, category: &str) -> Option<u64> {
        self.limits.get(category).copied()
    }

    pub fn usage_of(&self, category: &str) -> u64 {
        self.usage.get(category).copied().unwrap_or(0)
    }

    /// Sum of declared sizes across all categories. Maintained incrementally.
    pub fn total_used(&self) -> u64 {
        self.total_used
    }

    /// Bytes by which a category exceeds its soft limit (0 if unlimited).
    pub fn overage(&self, category: &str) -> u64 {
        match self.limit_of(category) {
            Some(limit) => self.usage_of(category).saturating_sub(limit),
            None => 0,
        }
    }

    pub fn is_over_limit(&self, category: &str) -> bool {
        self.overage(category) > 0
    }

    pub fn credit(&mut self, category: &str, bytes: u64) {
        *self.usage.entry(category.to_string()).or_insert(0) += bytes;
        self.total_used += bytes;
    }

    // Saturating: a debit for more than is recorded clamps to zero instead
    // of underflowing, so a bookkeeping slip degrades to drift the
    // consistency check can name, not a panic.
    pub fn debit(&mut self, category: &str, bytes: u64) {
        if let Some(used) = self.usage.get_mut(category) {
            *used = used.saturating_sub(bytes);
        }
        self.total_used = self.total_used.saturating_sub(bytes);
    }

    /// Current usage per category, for stats surfaces.
    pub fn usage_snapshot(&self) -> BTreeMap<String, u64> {
        self.usage.clone()
    }

    /// Configured limits per category, for stats surfaces.
    pub fn limit_snapshot(&self) -> BTreeMap<String, u64> {
        self.limits.clone()
    }
}
