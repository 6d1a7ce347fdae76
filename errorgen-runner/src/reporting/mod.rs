//! Reporting and artifact export pipeline.

pub mod artifacts;
pub mod histogram;
pub mod summary;

pub use artifacts::{read_manifest, ArtifactManager, ArtifactPaths, RunManifest};
pub use histogram::{histogram_script, HistogramOptions};
pub use summary::format_summary;
