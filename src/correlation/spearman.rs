//! Spearman rank correlation.

use crate::correlation::pearson::{
    check_correlation_input, pearson_r, t_probability, CorrelationResult, Tails,
};
use crate::correlation::rank::rank_values;
use crate::error::{EvalError, Result};

/// Offset subtracted from a perfect correlation before computing t.
pub const PERFECT_CORRELATION_EPSILON: f64 = 1e-10;

/// Spearman rank correlation of `x` and `y`.
///
/// Both series are ranked (ties share their mean rank) and r is the Pearson
/// correlation of the ranks. The p-value uses the rank-corrected t statistic
/// from [`spearman_t_probability`] rather than the Pearson p-value.
///
/// # Errors
/// `InputSize` if the lengths differ or fewer than 3 pairs are given;
/// `InvalidArgument` if any value is NaN or infinite.
pub fn spearman(x: &[f64], y: &[f64], tails: Tails) -> Result<CorrelationResult> {
    let n = check_correlation_input(x, y)?;

    let x_ranks = rank_values(x);
    let y_ranks = rank_values(y);
    let r = pearson_r(&x_ranks, &y_ranks);

    let p_value = spearman_t_probability(r, n, tails)?;
    log::debug!("spearman: n = {}, r = {}, p = {} ({})", n, r, p_value, tails);

    Ok(CorrelationResult { r, p_value })
}

/// Probability of a Spearman r from t = r * sqrt((n - 2) / (1 - r^2)).
///
/// An r of exactly 1.0 is replaced by `1.0 - PERFECT_CORRELATION_EPSILON`
/// before computing t. The returned r of [`spearman`] is not changed.
///
/// # Errors
/// `InputSize` if `n` < 3; `InvalidArgument` if `r` is NaN.
pub fn spearman_t_probability(r: f64, n: usize, tails: Tails) -> Result<f64> {
    if n < 3 {
        return Err(EvalError::InputSize(format!(
            "Spearman significance needs at least 3 pairs, got {}",
            n
        )));
    }

    let r = if r == 1.0 {
        log::warn!(
            "perfect Spearman correlation; using r = 1 - {:e} for the t statistic",
            PERFECT_CORRELATION_EPSILON
        );
        r - PERFECT_CORRELATION_EPSILON
    } else {
        r
    };

    let df = n as f64 - 2.0;
    let t = r * (df / (1.0 - r * r)).sqrt();
    t_probability(t, df, tails)
}
