//! Plain-text summary of aggregated counts.

use std::fmt::Write;

use errorgen_core::AggregatedCounts;

/// Render counts as text.
///
/// One line per numeric code in ascending order:
/// `Error Code <code>: <count> occurrences`. Non-numeric tokens follow in a
/// separate block, one line per distinct token in order of first appearance,
/// then their total.
pub fn format_summary(counts: &AggregatedCounts) -> String {
    let mut out = String::new();

    for (code, count) in &counts.numeric {
        let _ = writeln!(out, "Error Code {code}: {count} occurrences");
    }

    if !counts.non_numeric.is_empty() {
        for (token, count) in counts.non_numeric_counts() {
            let _ = writeln!(out, "Non-numeric code '{token}': {count} occurrences");
        }
        let _ = writeln!(out, "Non-numeric draws: {}", counts.non_numeric_draws());
    }

    out
}
