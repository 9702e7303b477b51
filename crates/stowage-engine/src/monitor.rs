//! Periodic memory pressure monitoring.
//!
//! Checks are cheap and happen on every due tick; sweeps only run when the
//! sampled pressure asks for one.

use stowage_core::pressure::{MaintenanceDecision, MemoryInfo, PressureThresholds};
use stowage_core::types::Tick;

pub struct PressureMonitor {
    thresholds: PressureThresholds,
    interval: Tick,
    last_maintenance: Tick,
}

impl PressureMonitor {
    pub fn new(thresholds: PressureThresholds, interval: Tick) -> Self {
        Self {
            thresholds,
            interval,
            last_maintenance: 0,
        }
    }

    /// Pure snapshot of the current memory situation.
    pub fn sample(&self, total_bytes: u64, used_bytes: u64) -> MemoryInfo {
        MemoryInfo::classify(total_bytes, used_bytes, self.thresholds)
    }

    /// Has the maintenance interval elapsed since the last check?
    pub fn is_due(&self, now: Tick) -> bool {
        now.saturating_sub(self.last_maintenance) >= self.interval
    }

    /// Combined gate: `None` when not due or when pressure is healthy;
    /// critical wins over low when both hold.
    pub fn should_maintain(&self, now: Tick, info: &MemoryInfo) -> MaintenanceDecision {
        if !self.is_due(now) {
            return MaintenanceDecision::None;
        }
        MaintenanceDecision::from_info(info)
    }

    pub fn mark_maintained(&mut self, now: Tick) {
        self.last_maintenance = now;
    }

    pub fn last_maintenance(&self) -> Tick {
        self.last_maintenance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> PressureMonitor {
        PressureMonitor::new(PressureThresholds::default(), 30_000)
    }

    #[test]
    fn not_due_before_interval() {
        let m = monitor();
        let info = m.sample(100, 97);
        assert_eq!(m.should_maintain(29_999, &info), MaintenanceDecision::None);
    }

    #[test]
    fn critical_wins_over_low_when_due() {
        let m = monitor();
        let info = m.sample(100, 97);
        assert!(info.is_low && info.is_critical);
        assert_eq!(
            m.should_maintain(30_000, &info),
            MaintenanceDecision::Aggressive
        );
    }

    #[test]
    fn low_pressure_requests_normal_sweep() {
        let m = monitor();
        let info = m.sample(100, 90);
        assert_eq!(
            m.should_maintain(30_000, &info),
            MaintenanceDecision::Normal
        );
    }

    #[test]
    fn healthy_memory_requests_nothing() {
        let m = monitor();
        let info = m.sample(100, 10);
        assert_eq!(m.should_maintain(60_000, &info), MaintenanceDecision::None);
    }

    #[test]
    fn mark_maintained_resets_the_interval() {
        let mut m = monitor();
        assert!(m.is_due(30_000));
        m.mark_maintained(30_000);
        assert!(!m.is_due(45_000));
        assert!(m.is_due(60_000));
    }
}
