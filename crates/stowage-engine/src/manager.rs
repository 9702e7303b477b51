//! CacheManager: the composition root.
//!
//! One explicitly owned instance wires the registry, ledger, sweep, and
//! pressure monitor together. There is no process-wide state: construct it at
//! startup, hand it (or handles from it) to producers, drop it at shutdown.

use std::collections::BTreeMap;

use stowage_core::clock::Clock;
use stowage_core::config::CacheConfig;
use stowage_core::pressure::MaintenanceDecision;
use stowage_core::types::Tick;
use stowage_store::{
    verify_accounting, CategoryLedger, ResourceHandle, ResourceRegistry,
};

use crate::clock::SystemClock;
use crate::monitor::PressureMonitor;
use crate::stats::{CacheStats, CategoryStats};
use crate::sweep::{run_sweep, SweepMode, SweepOutcome};

pub struct CacheManager {
    config: CacheConfig,
    clock: Box<dyn Clock>,
    registry: ResourceRegistry,
    ledger: CategoryLedger,
    monitor: PressureMonitor,
}

impl CacheManager {
    /// Build a manager over wall-clock milliseconds.
    pub fn new(config: CacheConfig) -> stowage_core::Result<Self> {
        Self::with_clock(config, Box::new(SystemClock::new()))
    }

    /// Build a manager with an injected clock. Tests and deterministic
    /// replays pass a [`crate::ManualClock`] here.
    pub fn with_clock(
        config: CacheConfig,
        clock: Box<dyn Clock>,
    ) -> stowage_core::Result<Self> {
        config.validate()?;
        let ledger = CategoryLedger::with_limits(config.category_limits.clone());
        let monitor = PressureMonitor::new(config.thresholds, config.maintenance_interval);
        Ok(Self {
            config,
            clock,
            registry: ResourceRegistry::new(),
            ledger,
            monitor,
        })
    }

    /// Take ownership of a produced buffer and start tracking it.
    ///
    /// Registering an existing id replaces the old record, with the old
    /// size debited from its category before the new size is credited. If
    /// the category then exceeds its soft limit, a normal sweep runs
    /// immediately against that category only, targeting the overage; the
    /// registration itself never fails for lack of space.
    pub fn register(
        &mut self,
        id: &str,
        data: Vec<u8>,
        category: &str,
        is_static: bool,
    ) -> stowage_store::Result<ResourceHandle> {
        let now = self.clock.now();
        let size_bytes = data.len() as u64;
        let (handle, displaced) = self.registry.insert(id, data, category, is_static, now)?;
        if let Some(old) = displaced {
            self.ledger.debit(&old.category, old.size_bytes);
        }
        self.ledger.credit(category, size_bytes);

        let overage = self.ledger.overage(category);
        if overage > 0 {
            tracing::info!(category, overage, "category over soft limit, sweeping");
            run_sweep(
                &mut self.registry,
                &mut self.ledger,
                now,
                SweepMode::Normal,
                self.config.normal_age,
                overage,
                Some(category),
            );
        }

        Ok(handle)
    }

    /// Stop tracking a resource and free its bytes. Idempotent: returns
    /// `false` if the id was not present.
    pub fn unregister(&mut self, id: &str) -> bool {
        match self.registry.remove(id) {
            Some(removed) => {
                self.ledger.debit(&removed.category, removed.size_bytes);
                true
            }
            None => false,
        }
    }

    /// Mark a resource as recently used. Returns `false` if absent.
    pub fn touch(&mut self, id: &str) -> bool {
        self.registry.touch(id, self.clock.now())
    }

    /// Resolve a handle to the cached bytes, touching the record. Consumers
    /// must re-fetch after any `tick` rather than holding the slice.
    pub fn fetch(&mut self, handle: &ResourceHandle) -> stowage_store::Result<&[u8]> {
        self.registry.fetch(handle, self.clock.now())
    }

    /// Periodic maintenance, called once per host update cycle with the
    /// host's current tick. Samples pressure when the interval is due and
    /// runs a global sweep sized to what the sample asked for.
    pub fn tick(&mut self, now: Tick) -> Option<SweepOutcome> {
        if !self.monitor.is_due(now) {
            return None;
        }
        let info = self
            .monitor
            .sample(self.config.total_budget_bytes, self.ledger.total_used());
        self.monitor.mark_maintained(now);

        let mode = match MaintenanceDecision::from_info(&info) {
            MaintenanceDecision::None => return None,
            MaintenanceDecision::Normal => SweepMode::Normal,
            MaintenanceDecision::Aggressive => SweepMode::Aggressive,
        };

        tracing::info!(
            mode = %mode,
            used_bytes = info.used_bytes,
            available_bytes = info.available_bytes,
            "memory pressure maintenance"
        );
        Some(self.sweep_global(mode, now))
    }

    /// Adjust a category's soft limit at runtime; `None` makes it unlimited.
    /// Enforcement stays lazy: nothing is evicted until the next threshold
    /// test at register or tick time.
    pub fn set_category_limit(&mut self, category: &str, max_bytes: Option<u64>) {
        self.ledger.set_limit(category, max_bytes);
    }

    /// Halve every configured category limit and sweep aggressively, for
    /// hosts that need to shed cache weight right now.
    pub fn reduce_memory_footprint(&mut self) -> SweepOutcome {
        for (category, limit) in self.ledger.limit_snapshot() {
            self.ledger.set_limit(&category, Some(limit / 2));
        }
        let now = self.clock.now();
        self.sweep_global(SweepMode::Aggressive, now)
    }

    /// Memory info plus per-category usage, for logs and counters.
    pub fn stats(&self) -> CacheStats {
        let memory = self
            .monitor
            .sample(self.config.total_budget_bytes, self.ledger.total_used());

        let mut categories: BTreeMap<String, CategoryStats> = BTreeMap::new();
        for (category, used_bytes) in self.ledger.usage_snapshot() {
            categories.insert(
                category.clone(),
                CategoryStats {
                    used_bytes,
                    limit_bytes: self.ledger.limit_of(&category),
                },
            );
        }
        for (category, limit) in self.ledger.limit_snapshot() {
            categories.entry(category).or_insert(CategoryStats {
                used_bytes: 0,
                limit_bytes: Some(limit),
            });
        }

        CacheStats {
            memory,
            categories,
            resident_records: self.registry.len(),
        }
    }

    pub fn usage_of(&self, category: &str) -> u64 {
        self.ledger.usage_of(category)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    pub fn resident_records(&self) -> usize {
        self.registry.len()
    }

    /// Full-scan consistency check between records and ledger counters.
    pub fn verify_accounting(&self) -> stowage_core::Result<()> {
        verify_accounting(&self.registry, &self.ledger)
    }

    fn sweep_global(&mut self, mode: SweepMode, now: Tick) -> SweepOutcome {
        run_sweep(
            &mut self.registry,
            &mut self.ledger,
            now,
            mode,
            mode.age_threshold(&self.config),
            mode.target_bytes(&self.config),
            None,
        )
    }
}
