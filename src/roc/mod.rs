//! ROC analysis over repeated prediction trials.
//!
//! Each trial (paired observed/expected values) contributes one point,
//! (false positive rate, sensitivity). The area under the curve is derived
//! from the Gini coefficient of the sorted points.

mod curve;

pub use curve::{
    gini_coefficient, roc_analysis, roc_auc, roc_points, roc_points_par, RocAnalysis, RocPoint,
};
