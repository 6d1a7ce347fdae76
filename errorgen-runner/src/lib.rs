//! Error-code generator runner: orchestration, reports, artifacts.
//!
//! This crate builds on `errorgen-core` to provide:
//! - Reproducible run configuration and run IDs
//! - Single-site and all-sites sampling runs
//! - Text summaries and ROOT histogram macros
//! - Artifact export (manifest, counts CSV/JSON, summary, histogram)

pub mod config;
pub mod reporting;
pub mod runner;

pub use config::{RunConfig, RunId, SiteSelection};
pub use reporting::{
    format_summary, histogram_script, ArtifactManager, ArtifactPaths, HistogramOptions,
    RunManifest,
};
pub use runner::{generate, run_all_sites, run_site, RunError, SiteRun};
