//! Generation-checked resource handles.

use std::fmt;

/// Ticket a producer receives at registration time.
///
/// The handle never borrows from the registry, so it can be stored across
/// ticks freely; it just stops resolving once the record it named is gone.
/// Re-registering the same id mints a new generation, so handles to the
/// displaced record go stale rather than silently aliasing the new bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    pub(crate) id: String,
    pub(crate) generation: u64,
}

impl ResourceHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.id, self.generation)
    }
}
