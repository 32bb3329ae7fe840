//! Evaluation of predicted abundance tables against expected tables.

pub mod config;
mod dataset;

pub use config::EvaluationConfig;
pub use dataset::{evaluate_dataset, evaluate_datasets, overlapping_ids, DatasetEvaluation};
