//! Correlation between observed and expected values.
//!
//! Pearson correlation is tested against Student's t with n - 2 degrees of
//! freedom. Spearman correlation ranks both series first (largest value gets
//! rank 1, ties share their mean rank) and uses a rank-corrected t statistic.

pub mod pearson;
pub mod rank;
pub mod spearman;

pub use pearson::{pearson, t_probability, CorrelationResult, Tails};
pub use rank::{rank_values, RankMap};
pub use spearman::{spearman, spearman_t_probability, PERFECT_CORRELATION_EPSILON};
