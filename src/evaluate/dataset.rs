//! Correlation of an observed (predicted) table against an expected table.

use crate::accuracy::{confusion_matrix, ConfusionCounts};
use crate::correlation::{pearson, spearman, CorrelationResult};
use crate::data::AbundanceTable;
use crate::error::{EvalError, Result};
use crate::evaluate::config::EvaluationConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Observed-vs-expected comparison of two abundance tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEvaluation {
    /// Identifiers present in both tables, in evaluation (sorted) order.
    pub overlapping_ids: Vec<String>,
    /// (observed, expected) pairs, ordered by identifier then sample.
    pub scatter_points: Vec<(f64, f64)>,
    /// Pearson correlation with two-tailed p-value.
    pub pearson: CorrelationResult,
    /// Spearman correlation with the configured tail mode.
    pub spearman: CorrelationResult,
    /// Presence/absence agreement of the scatter points under the
    /// configured presence policy.
    pub presence: ConfusionCounts,
}

impl DatasetEvaluation {
    /// Correlations keyed by method name ("pearson", "spearman").
    pub fn correlations(&self) -> BTreeMap<&'static str, CorrelationResult> {
        BTreeMap::from([("pearson", self.pearson), ("spearman", self.spearman)])
    }

    /// Number of scatter points.
    pub fn n_points(&self) -> usize {
        self.scatter_points.len()
    }

    /// Render as YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render as JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for DatasetEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Dataset Evaluation ({} shared ids, {} points)",
            self.overlapping_ids.len(),
            self.n_points()
        )?;
        writeln!(f, "  Pearson:  {}", self.pearson)?;
        writeln!(f, "  Spearman: {}", self.spearman)?;
        writeln!(f, "  Presence: {}", self.presence)?;
        Ok(())
    }
}

/// Identifiers present in both tables, sorted lexicographically.
pub fn overlapping_ids<O, E>(observed: &O, expected: &E) -> Vec<String>
where
    O: AbundanceTable + ?Sized,
    E: AbundanceTable + ?Sized,
{
    let observed_ids: BTreeSet<&str> = observed.observation_ids().into_iter().collect();
    let expected_ids: BTreeSet<&str> = expected.observation_ids().into_iter().collect();
    observed_ids
        .intersection(&expected_ids)
        .map(|id| id.to_string())
        .collect()
}

/// Evaluate how well an observed table reproduces an expected table.
///
/// Only identifiers present in both tables are used. Their per-sample
/// vectors are flattened, identifier by identifier in sorted order, into
/// two parallel series which are then correlated and scored for
/// presence/absence agreement with `config.presence_policy`.
///
/// # Errors
/// - `NoOverlap` if the tables share no identifiers
/// - `InputSize` if an identifier's vectors differ in length between the
///   tables, or fewer than 3 values remain
/// - `InvalidArgument` for a NaN or infinite value, or for a fractional
///   value under `FractionalPolicy::Reject`
pub fn evaluate_dataset<O, E>(
    observed: &O,
    expected: &E,
    config: &EvaluationConfig,
) -> Result<DatasetEvaluation>
where
    O: AbundanceTable + ?Sized,
    E: AbundanceTable + ?Sized,
{
    let ids = overlapping_ids(observed, expected);
    if ids.is_empty() {
        return Err(EvalError::NoOverlap);
    }
    log::debug!("evaluating {} overlapping ids", ids.len());

    let mut flat_observed = Vec::new();
    let mut flat_expected = Vec::new();
    for id in &ids {
        let obs = lookup(observed, id, "observed")?;
        let exp = lookup(expected, id, "expected")?;
        if obs.len() != exp.len() {
            return Err(EvalError::InputSize(format!(
                "id '{}' has {} observed values but {} expected values",
                id,
                obs.len(),
                exp.len()
            )));
        }
        flat_observed.extend(obs);
        flat_expected.extend(exp);
    }

    let scatter_points: Vec<(f64, f64)> = flat_observed
        .iter()
        .copied()
        .zip(flat_expected.iter().copied())
        .collect();

    let pearson = pearson(&flat_observed, &flat_expected)?;
    let spearman = spearman(&flat_observed, &flat_expected, config.tails)?;
    let presence = confusion_matrix(&flat_observed, &flat_expected, config.presence_policy)?;

    Ok(DatasetEvaluation {
        overlapping_ids: ids,
        scatter_points,
        pearson,
        spearman,
        presence,
    })
}

/// Evaluate several (observed, expected) table pairs in parallel.
///
/// Results keep the order of `pairs`; the first failure is returned.
pub fn evaluate_datasets<O, E>(
    pairs: &[(&O, &E)],
    config: &EvaluationConfig,
) -> Result<Vec<DatasetEvaluation>>
where
    O: AbundanceTable + Sync + ?Sized,
    E: AbundanceTable + Sync + ?Sized,
{
    pairs
        .par_iter()
        .map(|(observed, expected)| evaluate_dataset(*observed, *expected, config))
        .collect()
}

fn lookup<T: AbundanceTable + ?Sized>(table: &T, id: &str, which: &str) -> Result<Vec<f64>> {
    table.observation_vector(id).ok_or_else(|| {
        EvalError::InvalidArgument(format!(
            "id '{}' is listed by the {} table but has no values",
            id, which
        ))
    })
}
