//! YAML scenario format for deterministic cache replays.
//!
//! Example:
//! ```yaml
//! config:
//!   total_budget_bytes: 1048576
//! events:
//!   - register: { id: "tex1", category: "textures", size_bytes: 65536 }
//!   - advance: { ticks: 61000 }
//!   - register: { id: "tex2", category: "textures", size_bytes: 65536 }
//!   - touch: { id: "tex1" }
//!   - tick
//! ```
//!
//! Registered payloads are zero-filled buffers of the declared size; the
//! replay cares about accounting and eviction, not byte contents.

use serde::{Deserialize, Serialize};

use stowage_core::config::CacheConfig;
use stowage_core::types::Tick;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: Option<CacheConfig>,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Event {
    Register {
        id: String,
        category: String,
        size_bytes: u64,
        #[serde(rename = "static", default)]
        is_static: bool,
    },

    Touch {
        id: String,
    },

    Unregister {
        id: String,
    },

    /// Move the scenario clock forward.
    Advance {
        ticks: Tick,
    },

    /// One host update cycle: run periodic maintenance at the current tick.
    Tick,
}

pub fn parse_scenario(yaml: &str) -> Result<Scenario, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}
