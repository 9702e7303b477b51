//! Pressure classification and maintenance gating tests

use stowage_core::{MaintenanceDecision, MemoryInfo, PressureThresholds};
use stowage_engine::PressureMonitor;

#[test]
fn test_low_but_not_critical_classification() {
    // available = 10% of total: between the 5% and 15% watermarks.
    let info = MemoryInfo::classify(100, 90, PressureThresholds::default());
    assert!(info.is_low);
    assert!(!info.is_critical);
    assert_eq!(info.available_bytes, 10);
}

#[test]
fn test_critical_classification() {
    // available = 3% of total: under both watermarks.
    let info = MemoryInfo::classify(100, 97, PressureThresholds::default());
    assert!(info.is_low);
    assert!(info.is_critical);
}

#[test]
fn test_watermarks_compare_available_not_used() {
    // 14% used is healthy even though 14% < 15%: the watermark is on
    // available memory, not used.
    let info = MemoryInfo::classify(100, 14, PressureThresholds::default());
    assert!(!info.is_low);
    assert!(!info.is_critical);
}

#[test]
fn test_monitor_fires_only_after_interval() {
    let mut monitor = PressureMonitor::new(PressureThresholds::default(), 30_000);
    let info = monitor.sample(100, 97);

    assert_eq!(
        monitor.should_maintain(10_000, &info),
        MaintenanceDecision::None,
        "interval not elapsed yet"
    );
    assert_eq!(
        monitor.should_maintain(30_000, &info),
        MaintenanceDecision::Aggressive
    );

    monitor.mark_maintained(30_000);
    assert_eq!(
        monitor.should_maintain(40_000, &info),
        MaintenanceDecision::None,
        "interval restarts after maintenance"
    );
    assert_eq!(
        monitor.should_maintain(60_000, &info),
        MaintenanceDecision::Aggressive
    );
}

#[test]
fn test_decision_table() {
    let monitor = PressureMonitor::new(PressureThresholds::default(), 1);

    let healthy = monitor.sample(100, 50);
    assert_eq!(
        monitor.should_maintain(10, &healthy),
        MaintenanceDecision::None
    );

    let low = monitor.sample(100, 90);
    assert_eq!(
        monitor.should_maintain(10, &low),
        MaintenanceDecision::Normal
    );

    let critical = monitor.sample(100, 97);
    assert_eq!(
        monitor.should_maintain(10, &critical),
        MaintenanceDecision::Aggressive
    );
}

#[test]
fn test_threshold_validation() {
    assert!(PressureThresholds::default().validate().is_ok());

    let inverted = PressureThresholds {
        low: 0.05,
        critical: 0.15,
    };
    assert!(inverted.validate().is_err());

    let out_of_range = PressureThresholds {
        low: 1.5,
        critical: 0.05,
    };
    assert!(out_of_range.validate().is_err());
}
