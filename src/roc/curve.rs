//! ROC points from repeated trials and the area under the curve.

use crate::accuracy::accuracy_from_observations;
use crate::data::PairedSample;
use crate::error::{EvalError, Result};
use crate::evaluate::EvaluationConfig;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// One point on a ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    /// x: 1 - specificity.
    pub false_positive_rate: f64,
    /// y: true positive rate.
    pub sensitivity: f64,
}

impl RocPoint {
    /// Create a point from a false positive rate and a sensitivity.
    pub fn new(false_positive_rate: f64, sensitivity: f64) -> Self {
        Self {
            false_positive_rate,
            sensitivity,
        }
    }

    /// (x, y) tuple.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.false_positive_rate, self.sensitivity)
    }

    /// Lexicographic order on (x, y).
    fn cmp_xy(&self, other: &Self) -> Ordering {
        self.false_positive_rate
            .total_cmp(&other.false_positive_rate)
            .then(self.sensitivity.total_cmp(&other.sensitivity))
    }
}

impl From<(f64, f64)> for RocPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// ROC points for a set of trials and the AUC they enclose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocAnalysis {
    /// One point per trial, in trial order.
    pub points: Vec<RocPoint>,
    /// Area under the curve through the sorted points.
    pub auc: f64,
}

impl RocAnalysis {
    /// Render as YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render as JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RocAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ROC Analysis ({} trials)", self.points.len())?;
        writeln!(f, "  AUC: {:.3}", self.auc)?;
        for point in &self.points {
            writeln!(
                f,
                "    FPR {:.3}  TPR {:.3}",
                point.false_positive_rate, point.sensitivity
            )?;
        }
        Ok(())
    }
}

/// One ROC point per trial: (false positive rate, sensitivity).
///
/// Values between absence and presence are handled by
/// `config.presence_policy`.
///
/// # Errors
/// Any error from classifying a trial, including `UndefinedMetric` when a
/// trial has no expected positives or no expected negatives, and
/// `InvalidArgument` for a fractional value under `FractionalPolicy::Reject`.
pub fn roc_points(trials: &[PairedSample], config: &EvaluationConfig) -> Result<Vec<RocPoint>> {
    trials.iter().map(|trial| trial_point(trial, config)).collect()
}

/// Parallel version of [`roc_points`]; output keeps trial order.
pub fn roc_points_par(
    trials: &[PairedSample],
    config: &EvaluationConfig,
) -> Result<Vec<RocPoint>> {
    trials
        .par_iter()
        .map(|trial| trial_point(trial, config))
        .collect()
}

fn trial_point(trial: &PairedSample, config: &EvaluationConfig) -> Result<RocPoint> {
    let stats = accuracy_from_observations(
        trial.observed(),
        trial.expected(),
        config.presence_policy,
    )?;
    Ok(RocPoint::new(stats.false_positive_rate, stats.sensitivity))
}

/// Gini coefficient of a ROC curve by the trapezoidal rule.
///
/// Points are sorted by x, ties by y. With consecutive sorted points,
/// G = sum((x_k - x_{k-1}) * (y_k + y_{k-1})) - 1, so G = 2 * AUC - 1:
/// 1 for a perfect classifier, 0 along the diagonal.
///
/// # Errors
/// `InputSize` for fewer than 2 points.
pub fn gini_coefficient(points: &[RocPoint]) -> Result<f64> {
    if points.len() < 2 {
        return Err(EvalError::InputSize(format!(
            "ROC curve needs at least 2 points, got {}",
            points.len()
        )));
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(RocPoint::cmp_xy);

    let twice_area: f64 = sorted
        .windows(2)
        .map(|w| {
            (w[1].false_positive_rate - w[0].false_positive_rate)
                * (w[1].sensitivity + w[0].sensitivity)
        })
        .sum();

    Ok(twice_area - 1.0)
}

/// Area under the ROC curve, (G + 1) / 2.
pub fn roc_auc(points: &[RocPoint]) -> Result<f64> {
    let gini = gini_coefficient(points)?;
    let auc = (gini + 1.0) / 2.0;
    log::debug!("roc: {} points, gini = {}, auc = {}", points.len(), gini, auc);
    Ok(auc)
}

/// ROC points for every trial plus the AUC through them.
pub fn roc_analysis(trials: &[PairedSample], config: &EvaluationConfig) -> Result<RocAnalysis> {
    let points = roc_points(trials, config)?;
    let auc = roc_auc(&points)?;
    Ok(RocAnalysis { points, auc })
}
