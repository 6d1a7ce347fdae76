//! Tallying of classified draws.
//!
//! Numeric codes are counted per integer value. Non-numeric tokens are never
//! merged into the numeric tally; they are kept as an ordered log so reports
//! can surface them separately and in the order they were drawn.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classify::{CodeClass, DrawnCode};

/// Finalized counts of one sampling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedCounts {
    /// Integer code → occurrences, ascending by code.
    pub numeric: BTreeMap<i64, u64>,
    /// Raw non-numeric tokens, in draw order.
    pub non_numeric: Vec<String>,
    /// Total draws recorded (numeric + non-numeric).
    pub total_draws: u64,
}

impl AggregatedCounts {
    pub fn is_empty(&self) -> bool {
        self.total_draws == 0
    }

    pub fn numeric_draws(&self) -> u64 {
        self.numeric.values().sum()
    }

    pub fn non_numeric_draws(&self) -> u64 {
        self.non_numeric.len() as u64
    }

    pub fn count(&self, code: i64) -> u64 {
        self.numeric.get(&code).copied().unwrap_or(0)
    }

    /// `(min, max)` over numeric codes, or `None` if there are none.
    pub fn code_range(&self) -> Option<(i64, i64)> {
        let min = *self.numeric.keys().next()?;
        let max = *self.numeric.keys().next_back()?;
        Some((min, max))
    }

    /// Distinct non-numeric tokens with their counts, in order of first
    /// appearance.
    pub fn non_numeric_counts(&self) -> Vec<(&str, u64)> {
        let mut out: Vec<(&str, u64)> = Vec::new();
        for token in &self.non_numeric {
            match out.iter_mut().find(|(t, _)| *t == token.as_str()) {
                Some((_, n)) => *n += 1,
                None => out.push((token.as_str(), 1)),
            }
        }
        out
    }
}

/// Incremental aggregator fed once per draw, in draw order.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    counts: AggregatedCounts,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, drawn: &DrawnCode) {
        match &drawn.class {
            CodeClass::Numeric(code) => {
                *self.counts.numeric.entry(*code).or_insert(0) += 1;
            }
            CodeClass::NonNumeric(token) => {
                self.counts.non_numeric.push(token.clone());
            }
        }
        self.counts.total_draws += 1;
    }

    /// Current counts (a copy; the aggregator can keep recording).
    pub fn snapshot(&self) -> AggregatedCounts {
        self.counts.clone()
    }

    /// Consume the aggregator and return its final counts.
    pub fn finish(self) -> AggregatedCounts {
        self.counts
    }
}
