//! Prediction Accuracy Evaluation for Abundance Tables
//!
//! This library measures how well predicted (observed) abundance tables,
//! such as metagenome or trait predictions, reproduce expected reference
//! tables.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Abundance table contract, sparse in-memory table, paired samples
//! - **correlation**: Pearson and Spearman correlation with t-based p-values
//! - **accuracy**: Presence/absence confusion matrix and accuracy statistics
//! - **roc**: ROC points across trials and AUC via the Gini coefficient
//! - **evaluate**: Table-level evaluation and configuration
//!
//! # Example
//!
//! ```no_run
//! use abundance_eval::prelude::*;
//!
//! let observed = ObservationTable::from_rows(
//!     vec!["K00001".into(), "K00002".into()],
//!     vec!["sample1".into(), "sample2".into()],
//!     &[vec![3.0, 0.0], vec![1.0, 7.0]],
//! )
//! .unwrap();
//! let expected = ObservationTable::from_rows(
//!     vec!["K00001".into(), "K00002".into()],
//!     vec!["sample1".into(), "sample2".into()],
//!     &[vec![2.0, 0.0], vec![1.0, 5.0]],
//! )
//! .unwrap();
//!
//! let evaluation = evaluate_dataset(&observed, &expected, &EvaluationConfig::default()).unwrap();
//! println!("{}", evaluation);
//! ```

pub mod accuracy;
pub mod correlation;
pub mod data;
pub mod error;
pub mod evaluate;
pub mod roc;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::accuracy::{
        accuracy_from_observations, accuracy_stats, confusion_indices, confusion_matrix,
        AccuracyReport, ConfusionCounts, ConfusionIndices, FractionalPolicy,
    };
    pub use crate::correlation::{
        pearson, rank_values, spearman, spearman_t_probability, t_probability,
        CorrelationResult, RankMap, Tails, PERFECT_CORRELATION_EPSILON,
    };
    pub use crate::data::{AbundanceTable, ObservationTable, PairedSample};
    pub use crate::error::{EvalError, Result};
    pub use crate::evaluate::{
        evaluate_dataset, evaluate_datasets, overlapping_ids, DatasetEvaluation,
        EvaluationConfig,
    };
    pub use crate::roc::{
        gini_coefficient, roc_analysis, roc_auc, roc_points, roc_points_par, RocAnalysis,
        RocPoint,
    };
}
