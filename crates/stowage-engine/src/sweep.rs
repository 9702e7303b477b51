//! The eviction sweep.
//!
//! Recency is the only signal this policy trusts: candidates are ordered
//! oldest-access-first with insertion order breaking ties, and eviction stops
//! as soon as the byte target is met. `access_count` is tracked but never
//! consulted here.

use std::fmt;

use serde::{Deserialize, Serialize};

use stowage_core::config::CacheConfig;
use stowage_core::types::Tick;
use stowage_store::registry::SweepCandidate;
use stowage_store::{CategoryLedger, ResourceRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepMode {
    Normal,
    Aggressive,
}

impl SweepMode {
    /// Staleness cutoff for this mode: aggressive sweeps reclaim anything
    /// not touched recently, normal sweeps leave a longer grace period.
    pub fn age_threshold(&self, config: &CacheConfig) -> Tick {
        match self {
            SweepMode::Normal => config.normal_age,
            SweepMode::Aggressive => config.aggressive_age,
        }
    }

    /// How many bytes this mode tries to reclaim, as a share of the total
    /// budget. Aggressive sweeps target more, reflecting urgency.
    pub fn target_bytes(&self, config: &CacheConfig) -> u64 {
        let fraction = match self {
            SweepMode::Normal => config.normal_target_fraction,
            SweepMode::Aggressive => config.aggressive_target_fraction,
        };
        (config.total_budget_bytes as f64 * fraction) as u64
    }
}

impl fmt::Display for SweepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepMode::Normal => write!(f, "normal"),
            SweepMode::Aggressive => write!(f, "aggressive"),
        }
    }
}

/// What one sweep actually did. `freed_bytes` may fall short of
/// `target_bytes`: static and fresh records are never taken, so
/// under-reclamation is a legal outcome the caller decides how to treat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub mode: SweepMode,
    pub target_bytes: u64,
    pub freed_bytes: u64,
    /// Records actually evicted.
    pub evicted: usize,
    /// Candidates that passed the age/static filter.
    pub examined: usize,
}

impl SweepOutcome {
    pub fn met_target(&self) -> bool {
        self.freed_bytes >= self.target_bytes
    }

    pub fn shortfall(&self) -> u64 {
        self.target_bytes.saturating_sub(self.freed_bytes)
    }
}

/// Run one eviction pass over `registry`, debiting `ledger` per eviction.
///
/// Candidates are non-static records untouched for more than `age_threshold`
/// ticks (optionally restricted to one `category`), evicted oldest-first
/// until `target_bytes` have been reclaimed or the candidate list is
/// exhausted. The snapshot is taken before any mutation.
pub fn run_sweep(
    registry: &mut ResourceRegistry,
    ledger: &mut CategoryLedger,
    now: Tick,
    mode: SweepMode,
    age_threshold: Tick,
    target_bytes: u64,
    category: Option<&str>,
) -> SweepOutcome {
    let mut candidates: Vec<SweepCandidate> =
        registry.candidates(now, age_threshold, category).collect();
    candidates.sort_by_key(|c| (c.last_accessed, c.seq));
    let examined = candidates.len();

    let mut freed_bytes = 0u64;
    let mut evicted = 0usize;
    for candidate in candidates {
        if freed_bytes >= target_bytes {
            break;
        }
        if let Some(removed) = registry.remove(&candidate.id) {
            ledger.debit(&removed.category, removed.size_bytes);
            freed_bytes += removed.size_bytes;
            evicted += 1;
            tracing::debug!(
                id = candidate.id.as_str(),
                category = removed.category.as_str(),
                size_bytes = removed.size_bytes,
                "evicted resource"
            );
        }
    }

    let outcome = SweepOutcome {
        mode,
        target_bytes,
        freed_bytes,
        evicted,
        examined,
    };

    if outcome.met_target() {
        tracing::debug!(
            mode = %mode,
            freed_bytes,
            evicted,
            "sweep complete"
        );
    } else {
        tracing::warn!(
            mode = %mode,
            freed_bytes,
            target_bytes,
            shortfall = outcome.shortfall(),
            examined,
            "sweep under-reclaimed"
        );
    }

    outcome
}
