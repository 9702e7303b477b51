use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    // Only the explicit full-scan consistency check reports this; normal
    // operation maintains the counters transactionally and never rescans.
    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}
