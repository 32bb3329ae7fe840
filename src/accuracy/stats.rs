//! Accuracy statistics derived from a confusion matrix.

use crate::accuracy::confusion::{confusion_matrix, ConfusionCounts, FractionalPolicy};
use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification accuracy of observed against expected presence calls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Precision = TP / (TP + FP).
    pub positive_predictive_value: f64,
    /// Recall, true positive rate = TP / (TP + FN).
    pub sensitivity: f64,
    /// True negative rate = TN / (TN + FP).
    pub specificity: f64,
    /// FP / (FP + TN), equal to 1 - specificity.
    pub false_positive_rate: f64,
    /// (TP + TN) / (TP + FP + FN + TN).
    pub accuracy: f64,
}

impl AccuracyReport {
    /// Metric names and values in a fixed order.
    pub fn metrics(&self) -> [(&'static str, f64); 5] {
        [
            ("positive_predictive_value", self.positive_predictive_value),
            ("sensitivity", self.sensitivity),
            ("specificity", self.specificity),
            ("false_positive_rate", self.false_positive_rate),
            ("accuracy", self.accuracy),
        ]
    }

    /// Look up a metric by name.
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.metrics()
            .iter()
            .find(|(name, _)| *name == metric)
            .map(|&(_, value)| value)
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

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy Statistics")?;
        writeln!(f, "  PPV:         {:.1}%", self.positive_predictive_value * 100.0)?;
        writeln!(f, "  Sensitivity: {:.1}%", self.sensitivity * 100.0)?;
        writeln!(f, "  Specificity: {:.1}%", self.specificity * 100.0)?;
        writeln!(f, "  FPR:         {:.1}%", self.false_positive_rate * 100.0)?;
        writeln!(f, "  Accuracy:    {:.1}%", self.accuracy * 100.0)?;
        Ok(())
    }
}

/// Compute accuracy statistics from confusion-matrix counts.
///
/// Unclassified positions do not enter any ratio.
///
/// # Errors
/// `UndefinedMetric` naming the first metric whose denominator is zero.
pub fn accuracy_stats(counts: &ConfusionCounts) -> Result<AccuracyReport> {
    let tp = counts.true_positive as f64;
    let fp = counts.false_positive as f64;
    let fn_ = counts.false_negative as f64;
    let tn = counts.true_negative as f64;

    Ok(AccuracyReport {
        positive_predictive_value: ratio(tp, tp + fp, "positive_predictive_value")?,
        sensitivity: ratio(tp, tp + fn_, "sensitivity")?,
        specificity: ratio(tn, tn + fp, "specificity")?,
        false_positive_rate: ratio(fp, fp + tn, "false_positive_rate")?,
        accuracy: ratio(tp + tn, tp + fp + fn_ + tn, "accuracy")?,
    })
}

/// Threshold paired observed/expected values and compute accuracy statistics.
pub fn accuracy_from_observations(
    observed: &[f64],
    expected: &[f64],
    policy: FractionalPolicy,
) -> Result<AccuracyReport> {
    let counts = confusion_matrix(observed, expected, policy)?;
    accuracy_stats(&counts)
}

fn ratio(numerator: f64, denominator: f64, metric: &'static str) -> Result<f64> {
    if denominator == 0.0 {
        return Err(EvalError::UndefinedMetric { metric });
    }
    Ok(numerator / denominator)
}
