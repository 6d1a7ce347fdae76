//! Serializable run configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use errorgen_core::RngHierarchy;

/// Unique identifier for a run (content-addressable hash).
pub type RunId = String;

/// Which sites a run samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum SiteSelection {
    Single(String),
    All,
}

/// Everything needed to reproduce a run exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Site dictionary JSON file.
    pub input: PathBuf,
    pub site: SiteSelection,
    /// Draws per site.
    pub draws: u64,
    /// Master seed of the RNG hierarchy.
    pub seed: u64,
}

impl RunConfig {
    /// Deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId and produce identical
    /// counts.
    pub fn run_id(&self) -> RunId {
        // Only a non-UTF-8 input path fails to serialize.
        let json = serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"));
        let hash = blake3::hash(json.as_bytes());
        hash.to_hex().as_str()[..16].to_string()
    }

    pub fn rng_hierarchy(&self) -> RngHierarchy {
        RngHierarchy::new(self.seed)
    }
}
