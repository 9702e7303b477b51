//! Base vocabulary types for the cache.
//!
//! Resource ids and categories are caller-assigned strings: ids must be
//! non-empty and unique (re-registering an id replaces the old record);
//! categories are an open set: an unknown category is valid and gets
//! unlimited budget state on first use.

/// Monotonic cache time, in caller-defined units.
///
/// The cache never reads a wall clock itself; every operation that needs
/// "now" receives it as a `Tick` or asks the injected [`crate::Clock`].
/// The stock clock in `stowage-engine` uses milliseconds, matching the
/// ticks the age thresholds and maintenance interval default to.
pub type Tick = u64;

/// Well-known category names. Purely conventional: the ledger accepts any
/// string, these are just the partitions the default config budgets for.
pub mod categories {
    pub const TEXTURES: &str = "textures";
    pub const SOUNDS: &str = "sounds";
    pub const ANIMATIONS: &str = "animations";
    pub const SCRIPTS: &str = "scripts";
}
