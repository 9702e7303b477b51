//! Owning registry of cached resources.
//!
//! One record per id. The registry holds the bytes themselves; everything a
//! consumer keeps is a [`ResourceHandle`] that must be re-checked on every
//! access. Mutations report the accounting delta to the caller, who applies
//! it to the [`CategoryLedger`] in the same operation.

use std::collections::HashMap;

use stowage_core::error::Error as CoreError;
use stowage_core::types::Tick;

use crate::error::{Error, Result};
use crate::handle::ResourceHandle;
use crate::ledger::CategoryLedger;

/// One tracked in-memory resource. The registry owns it exclusively.
#[derive(Debug)]
pub struct ResourceRecord {
    data: Vec<u8>,
    size_bytes: u64,
    category: String,
    last_accessed: Tick,
    access_count: u64,
    is_static: bool,
    // Registry-wide insertion number; the sweep's only tie-break.
    seq: u64,
    generation: u64,
}

impl ResourceRecord {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Declared size, captured once at registration and never re-measured.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn last_accessed(&self) -> Tick {
        self.last_accessed
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Accounting info for a record that left the registry (removal or
/// displacement by an overwrite). The caller debits the ledger with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub category: String,
    pub size_bytes: u64,
}

/// Owned view of one eviction candidate, detached from the registry so the
/// sweep can sort and then mutate without holding a borrow.
#[derive(Debug, Clone)]
pub struct SweepCandidate {
    pub id: String,
    pub last_accessed: Tick,
    pub size_bytes: u64,
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct ResourceRegistry {
    records: HashMap<String, ResourceRecord>,
    next_seq: u64,
    next_generation: u64,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a record, taking ownership of its bytes.
    ///
    /// If `id` is already present the old record is displaced and its
    /// accounting info returned, so the caller can debit the old category
    /// before crediting the new one. Handles to the displaced record go
    /// stale: the replacement gets a fresh generation.
    pub fn insert(
        &mut self,
        id: &str,
        data: Vec<u8>,
        category: &str,
        is_static: bool,
        now: Tick,
    ) -> Result<(ResourceHandle, Option<Removed>)> {
        if id.is_empty() {
            return Err(Error::EmptyId);
        }

        let displaced = self.records.remove(id).map(|old| Removed {
            category: old.category,
            size_bytes: old.size_bytes,
        });

        let seq = self.next_seq;
        self.next_seq += 1;
        let generation = self.next_generation;
        self.next_generation += 1;

        let size_bytes = data.len() as u64;
        let record = ResourceRecord {
            data,
            size_bytes,
            category: category.to_string(),
            last_accessed: now,
            access_count: 1,
            is_static,
            seq,
            generation,
        };
        self.records.insert(id.to_string(), record);

        #[cfg(feature = "tracing")]
        tracing::debug!(id, category, size_bytes, is_static, "registered resource");

        Ok((
            ResourceHandle {
                id: id.to_string(),
                generation,
            },
            displaced,
        ))
    }

    /// Remove a record and drop its bytes. Idempotent: `None` if absent.
    pub fn remove(&mut self, id: &str) -> Option<Removed> {
        let old = self.records.remove(id)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(id, category = old.category.as_str(), size_bytes = old.size_bytes, "unregistered resource");

        Some(Removed {
            category: old.category,
            size_bytes: old.size_bytes,
        })
    }

    /// Mark a record as recently used. `false` if absent.
    ///
    /// `last_accessed` never moves backwards, even if the caller's ticks do.
    pub fn touch(&mut self, id: &str, now: Tick) -> bool {
        match self.records.get_mut(id) {
            Some(record) => {
                record.last_accessed = record.last_accessed.max(now);
                record.access_count += 1;
                true
            }
            None => false,
        }
    }

    /// Resolve a handle to the resource bytes, touching the record.
    ///
    /// Fails with [`Error::StaleHandle`] if the record was evicted,
    /// unregistered, or displaced since the handle was minted.
    pub fn fetch(&mut self, handle: &ResourceHandle, now: Tick) -> Result<&[u8]> {
        match self.records.get_mut(handle.id()) {
            Some(record) if record.generation == handle.generation() => {
                record.last_accessed = record.last_accessed.max(now);
                record.access_count += 1;
                Ok(&record.data)
            }
            _ => Err(Error::StaleHandle {
                id: handle.id().to_string(),
                generation: handle.generation(),
            }),
        }
    }

    /// Lazy, one-shot snapshot of eviction candidates: non-static records
    /// untouched for more than `age_threshold` ticks, optionally restricted
    /// to one category. Yields owned items so callers iterate first and
    /// mutate after; the registry must not change while the iterator lives.
    pub fn candidates<'a>(
        &'a self,
        now: Tick,
        age_threshold: Tick,
        category: Option<&'a str>,
    ) -> impl Iterator<Item = SweepCandidate> + 'a {
        let cutoff = now.saturating_sub(age_threshold);
        self.records.iter().filter_map(move |(id, record)| {
            if record.is_static || record.last_accessed >= cutoff {
                return None;
            }
            if let Some(wanted) = category {
                if record.category != wanted {
                    return None;
                }
            }
            Some(SweepCandidate {
                id: id.clone(),
                last_accessed: record.last_accessed,
                size_bytes: record.size_bytes,
                seq: record.seq,
            })
        })
    }

    pub fn get(&self, id: &str) -> Option<&ResourceRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceRecord)> {
        self.records.iter().map(|(id, record)| (id.as_str(), record))
    }
}

/// Full-scan consistency check: the one place usage is ever recomputed.
///
/// Verifies that the sum of declared sizes per category equals the ledger's
/// running counter for every category either side knows about.
pub fn verify_accounting(
    registry: &ResourceRegistry,
    ledger: &CategoryLedger,
) -> stowage_core::error::Result<()> {
    let mut scanned: std::collections::BTreeMap<&str, u64> = Default::default();
    for (_, record) in registry.iter() {
        *scanned.entry(record.category()).or_insert(0) += record.size_bytes();
    }

    for (category, &sum) in &scanned {
        let counted = ledger.usage_of(category);
        if counted != sum {
            return Err(CoreError::Invariant(format!(
                "category '{category}' ledger says {counted} bytes, records sum to {sum}"
            )));
        }
    }
    for (category, counted) in ledger.usage_snapshot() {
        if counted != 0 && !scanned.contains_key(category.as_str()) {
            return Err(CoreError::Invariant(format!(
                "category '{category}' ledger says {counted} bytes, but no records exist"
            )));
        }
    }

    let total: u64 = scanned.values().sum();
    if total != ledger.total_used() {
        return Err(CoreError::Invariant(format!(
            "ledger total {} differs from record sum {total}",
            ledger.total_used()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_reports_displaced_record() {
        let mut registry = ResourceRegistry::new();
        let (first, none) = registry
            .insert("tex1", vec![0u8; 100], "textures", false, 0)
            .expect("insert");
        assert!(none.is_none());

        let (second, displaced) = registry
            .insert("tex1", vec![0u8; 40], "sounds", false, 5)
            .expect("overwrite");
        let displaced = displaced.expect("displaced info");
        assert_eq!(displaced.category, "textures");
        assert_eq!(displaced.size_bytes, 100);

        // The old handle no longer resolves; the new one does.
        assert!(registry.fetch(&first, 6).is_err());
        assert_eq!(registry.fetch(&second, 6).expect("fetch").len(), 40);
    }

    #[test]
    fn touch_never_decreases_last_accessed() {
        let mut registry = ResourceRegistry::new();
        registry
            .insert("snd", vec![0u8; 8], "sounds", false, 100)
            .expect("insert");

        assert!(registry.touch("snd", 50));
        assert_eq!(registry.get("snd").expect("record").last_accessed(), 100);

        assert!(registry.touch("snd", 200));
        assert_eq!(registry.get("snd").expect("record").last_accessed(), 200);
    }

    #[test]
    fn candidates_skip_static_and_fresh_records() {
        let mut registry = ResourceRegistry::new();
        registry
            .insert("old", vec![0u8; 10], "textures", false, 0)
            .expect("insert");
        registry
            .insert("pinned", vec![0u8; 10], "textures", true, 0)
            .expect("insert");
        registry
            .insert("fresh", vec![0u8; 10], "textures", false, 90)
            .expect("insert");

        let ids: Vec<String> = registry
            .candidates(100, 50, None)
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["old".to_string()]);
    }
}
