#![forbid(unsafe_code)]
//! stowage-store: owning resource registry and category accounting.
//!
//! The registry is the exclusive owner of every cached byte buffer. Producers
//! hand buffers over at registration and get a generation-checked
//! [`ResourceHandle`] back; a handle that outlives its record fails loudly
//! instead of touching freed memory. The ledger mirrors every registry
//! mutation transactionally so per-category usage is never recomputed by
//! scanning.
//!
//! No eviction policy lives here. The sweep and the composition root are in
//! `stowage-engine`.

pub mod error;
pub mod handle;
pub mod ledger;
pub mod registry;

pub use error::{Error, Result};
pub use handle::ResourceHandle;
pub use ledger::CategoryLedger;
pub use registry::{verify_accounting, Removed, ResourceRecord, ResourceRegistry, SweepCandidate};
