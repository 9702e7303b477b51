use thiserror::Error;

/// Result type local to stowage-store.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("resource id must be non-empty")]
    EmptyId,

    // Covers eviction, unregistration, and overwrite: in every case the
    // handle's generation no longer matches a live record.
    #[error("stale handle for resource '{id}' (generation {generation})")]
    StaleHandle { id: String, generation: u64 },
}
