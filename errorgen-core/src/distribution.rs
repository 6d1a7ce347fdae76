//! Weighted distribution over error-code tokens.
//!
//! A [`WeightedDistribution`] is built once from a site's code→weight map and
//! is immutable afterwards. Its enumeration order is fixed at construction:
//! entries are sorted lexicographically by token, and the cumulative weight
//! table is computed over exactly that order. Sampling indexes into the same
//! stored sequence, so there is never a second, independent iteration over the
//! source map whose order could disagree with the weights.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Code token → weight, as read from a site entry in the dictionary.
///
/// Weights are signed so that negative values survive parsing and are
/// rejected here with a precise error instead of a generic parse failure.
pub type CodeWeightMap = BTreeMap<String, i64>;

/// Errors from distribution construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("distribution is empty: no codes, or all weights are zero")]
    Empty,

    #[error("invalid weight {weight} for code '{code}': weights must be non-negative")]
    InvalidWeight { code: String, weight: i64 },

    #[error("total weight overflows u64")]
    WeightOverflow,
}

/// One entry of a distribution: a code token and its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedCode {
    pub code: String,
    pub weight: u64,
}

/// Immutable discrete distribution over code tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedDistribution {
    entries: Vec<WeightedCode>,
    /// `cumulative[i]` = sum of weights of `entries[0..=i]`.
    cumulative: Vec<u64>,
    total_weight: u64,
}

impl WeightedDistribution {
    /// Build a distribution from `(code, weight)` pairs.
    ///
    /// Any iterator of pairs is accepted; the resulting order is always
    /// ascending by token regardless of the input order. Zero-weight codes are
    /// kept (they occupy an empty interval and are never drawn). Duplicate
    /// tokens keep the last weight seen.
    pub fn build<I, S>(codes: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut by_code: BTreeMap<String, u64> = BTreeMap::new();
        for (code, weight) in codes {
            let code = code.into();
            if weight < 0 {
                return Err(DistributionError::InvalidWeight { code, weight });
            }
            by_code.insert(code, weight as u64);
        }

        // Ascending token order, frozen from here on.
        let entries: Vec<WeightedCode> = by_code
            .into_iter()
            .map(|(code, weight)| WeightedCode { code, weight })
            .collect();

        let mut cumulative = Vec::with_capacity(entries.len());
        let mut running: u64 = 0;
        for entry in &entries {
            running = running
                .checked_add(entry.weight)
                .ok_or(DistributionError::WeightOverflow)?;
            cumulative.push(running);
        }

        if running == 0 {
            return Err(DistributionError::Empty);
        }

        Ok(Self {
            entries,
            cumulative,
            total_weight: running,
        })
    }

    /// Build from a site's code→weight map.
    pub fn from_map(map: &CodeWeightMap) -> Result<Self, DistributionError> {
        Self::build(map.iter().map(|(code, weight)| (code.as_str(), *weight)))
    }

    /// Entries in their fixed enumeration order.
    pub fn entries(&self) -> &[WeightedCode] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a successfully built distribution.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Probability of drawing `code` (0.0 for unknown or zero-weight codes).
    pub fn probability(&self, code: &str) -> f64 {
        self.entries
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.weight as f64 / self.total_weight as f64)
            .unwrap_or(0.0)
    }

    /// Index of the entry whose half-open interval
    /// `[cumulative[i-1], cumulative[i])` contains `point`.
    ///
    /// `point` must lie in `[0, total_weight)`. Zero-weight entries have an
    /// empty interval and are never returned.
    pub(crate) fn index_for(&self, point: u64) -> usize {
        let idx = self.cumulative.partition_point(|&c| c <= point);
        idx.min(self.entries.len() - 1)
    }
}
