//! Error-code generator core: weighted distributions over error codes.
//!
//! This crate contains the sampling engine:
//! - Site dictionary (site → code → weight) and site lookup
//! - Distribution builder with a fixed, stored enumeration order
//! - Sampler driven by a caller-owned, seedable generator
//! - Code classifier (numeric vs. opaque tokens)
//! - Aggregator for per-run counts
//! - Deterministic per-site RNG hierarchy

pub mod aggregate;
pub mod classify;
pub mod distribution;
pub mod rng;
pub mod sampler;
pub mod sites;

pub use aggregate::{AggregatedCounts, Aggregator};
pub use classify::{classify, CodeClass, DrawnCode};
pub use distribution::{CodeWeightMap, DistributionError, WeightedCode, WeightedDistribution};
pub use rng::RngHierarchy;
pub use sampler::{draw, Draws, Sampler};
pub use sites::{SiteDictionary, SiteError};
