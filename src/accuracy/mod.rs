//! Presence/absence classification accuracy.

pub mod confusion;
pub mod stats;

pub use confusion::{
    confusion_indices, confusion_matrix, ConfusionCounts, ConfusionIndices, FractionalPolicy,
};
pub use stats::{accuracy_from_observations, accuracy_stats, AccuracyReport};
