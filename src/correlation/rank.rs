//! Rank transform for Spearman correlation.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Mapping from value to rank, built from one sequence.
///
/// Ranks count from 1 in descending value order. Tied values share the mean
/// of the positions they occupy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankMap {
    /// (value, rank) pairs sorted by value, largest first.
    entries: Vec<(f64, f64)>,
}

impl RankMap {
    /// Build the rank mapping for a sequence of values.
    pub fn from_values(values: &[f64]) -> Self {
        let mut ordered: Vec<f64> = values.iter().copied().map(canonical).collect();
        ordered.sort_by(|a, b| b.total_cmp(a));

        let mut entries = Vec::new();
        let mut i = 0;
        while i < ordered.len() {
            // Find the end of the tie group.
            let mut j = i + 1;
            while j < ordered.len() && ordered[j].total_cmp(&ordered[i]) == Ordering::Equal {
                j += 1;
            }

            // Positions (i+1)..=j, 1-based; their mean is the midpoint.
            let rank = (i + 1 + j) as f64 / 2.0;
            entries.push((ordered[i], rank));

            i = j;
        }

        Self { entries }
    }

    /// Rank of a value, or `None` if it was not in the source sequence.
    pub fn rank_of(&self, value: f64) -> Option<f64> {
        let value = canonical(value);
        self.entries
            .binary_search_by(|probe| value.total_cmp(&probe.0))
            .ok()
            .map(|idx| self.entries[idx].1)
    }

    /// Map a sequence to ranks, preserving its order.
    ///
    /// Values missing from the map rank as NaN.
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        values
            .iter()
            .map(|&v| self.rank_of(v).unwrap_or(f64::NAN))
            .collect()
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rank each value, averaging ranks over ties.
///
/// Ranks are returned in the same order as the input values.
pub fn rank_values(values: &[f64]) -> Vec<f64> {
    RankMap::from_values(values).apply(values)
}

/// Fold negative zero onto zero so both rank together.
#[inline]
fn canonical(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
