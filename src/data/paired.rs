//! Paired observed/expected value sequences.

use crate::error::{EvalError, Result};
use serde::Serialize;

/// Observed (predicted) values paired by position with expected values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairedSample {
    observed: Vec<f64>,
    expected: Vec<f64>,
}

impl PairedSample {
    /// Pair two sequences, failing if their lengths differ.
    pub fn new(observed: Vec<f64>, expected: Vec<f64>) -> Result<Self> {
        check_paired(&observed, &expected)?;
        Ok(Self { observed, expected })
    }

    /// Observed values.
    #[inline]
    pub fn observed(&self) -> &[f64] {
        &self.observed
    }

    /// Expected values.
    #[inline]
    pub fn expected(&self) -> &[f64] {
        &self.expected
    }

    /// Number of paired positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// (observed, expected) pairs in position order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.observed
            .iter()
            .copied()
            .zip(self.expected.iter().copied())
            .collect()
    }
}

/// Fail with an input-size error unless both slices have the same length.
pub(crate) fn check_paired(observed: &[f64], expected: &[f64]) -> Result<()> {
    if observed.len() != expected.len() {
        return Err(EvalError::InputSize(format!(
            "paired sequences differ in length ({} vs {})",
            observed.len(),
            expected.len()
        )));
    }
    Ok(())
}
