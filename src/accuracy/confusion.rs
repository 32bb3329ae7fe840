//! Confusion matrix from thresholded observed/expected abundances.
//!
//! A value of 1 or more counts as present and a value of exactly 0 counts
//! as absent. Anything else (fractions in (0, 1), negatives, NaN) is neither,
//! and is handled according to [`FractionalPolicy`].

use crate::data::paired::check_paired;
use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handling of values that are neither present (>= 1) nor absent (== 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractionalPolicy {
    /// Leave the position out of all four classes and count it as unclassified.
    #[default]
    Unclassified,
    /// Fail with an invalid-argument error.
    Reject,
}

/// Presence call for a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Present,
    Absent,
    Neither,
}

impl Call {
    fn of(value: f64) -> Self {
        if value >= 1.0 {
            Self::Present
        } else if value == 0.0 {
            Self::Absent
        } else {
            Self::Neither
        }
    }
}

/// Positions falling into each confusion-matrix class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionIndices {
    /// Expected present, observed present.
    pub true_positives: Vec<usize>,
    /// Expected absent, observed present.
    pub false_positives: Vec<usize>,
    /// Expected present, observed absent.
    pub false_negatives: Vec<usize>,
    /// Expected absent, observed absent.
    pub true_negatives: Vec<usize>,
    /// Positions where either value is neither present nor absent.
    pub unclassified: Vec<usize>,
}

impl ConfusionIndices {
    /// Collapse the index lists into counts.
    pub fn counts(&self) -> ConfusionCounts {
        ConfusionCounts {
            true_positive: self.true_positives.len(),
            false_positive: self.false_positives.len(),
            false_negative: self.false_negatives.len(),
            true_negative: self.true_negatives.len(),
            unclassified: self.unclassified.len(),
        }
    }
}

/// Counts of each confusion-matrix class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_negative: usize,
    /// Positions excluded from the four classes.
    pub unclassified: usize,
}

impl ConfusionCounts {
    /// Counts for the four classes with nothing unclassified.
    pub fn new(
        true_positive: usize,
        false_positive: usize,
        false_negative: usize,
        true_negative: usize,
    ) -> Self {
        Self {
            true_positive,
            false_positive,
            false_negative,
            true_negative,
            unclassified: 0,
        }
    }

    /// Number of classified positions (TP + FP + FN + TN).
    pub fn n_classified(&self) -> usize {
        self.true_positive + self.false_positive + self.false_negative + self.true_negative
    }

    /// Number of compared positions, classified or not.
    pub fn total(&self) -> usize {
        self.n_classified() + self.unclassified
    }
}

impl fmt::Display for ConfusionCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TP: {}, FP: {}, FN: {}, TN: {}",
            self.true_positive, self.false_positive, self.false_negative, self.true_negative
        )?;
        if self.unclassified > 0 {
            write!(f, " ({} unclassified)", self.unclassified)?;
        }
        Ok(())
    }
}

/// Classify every position of paired observed/expected values.
///
/// # Errors
/// `InputSize` if the lengths differ; `InvalidArgument` for a fractional
/// value under [`FractionalPolicy::Reject`].
pub fn confusion_indices(
    observed: &[f64],
    expected: &[f64],
    policy: FractionalPolicy,
) -> Result<ConfusionIndices> {
    check_paired(observed, expected)?;

    let mut indices = ConfusionIndices::default();
    for (i, (&obs, &exp)) in observed.iter().zip(expected.iter()).enumerate() {
        match (Call::of(exp), Call::of(obs)) {
            (Call::Present, Call::Present) => indices.true_positives.push(i),
            (Call::Absent, Call::Present) => indices.false_positives.push(i),
            (Call::Present, Call::Absent) => indices.false_negatives.push(i),
            (Call::Absent, Call::Absent) => indices.true_negatives.push(i),
            _ => match policy {
                FractionalPolicy::Unclassified => indices.unclassified.push(i),
                FractionalPolicy::Reject => {
                    return Err(EvalError::InvalidArgument(format!(
                        "position {} is neither present nor absent (observed {}, expected {})",
                        i, obs, exp
                    )))
                }
            },
        }
    }

    if !indices.unclassified.is_empty() {
        log::warn!(
            "{} of {} positions are neither present (>= 1) nor absent (== 0) and were not classified",
            indices.unclassified.len(),
            observed.len()
        );
    }

    Ok(indices)
}

/// Count true/false positives/negatives for paired observed/expected values.
pub fn confusion_matrix(
    observed: &[f64],
    expected: &[f64],
    policy: FractionalPolicy,
) -> Result<ConfusionCounts> {
    let counts = confusion_indices(observed, expected, policy)?.counts();
    log::debug!("confusion matrix: {}", counts);
    Ok(counts)
}
