//! Diagnostic snapshot types for telemetry surfaces.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stowage_core::pressure::MemoryInfo;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub used_bytes: u64,
    /// Soft limit; `None` means unlimited.
    pub limit_bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub memory: MemoryInfo,
    pub categories: BTreeMap<String, CategoryStats>,
    pub resident_records: usize,
}
