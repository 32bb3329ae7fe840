//! Pearson product-moment correlation with t-distribution significance.

use crate::data::paired::check_paired;
use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::fmt;
use std::str::FromStr;

/// Which tail(s) of the t-distribution a significance test uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tails {
    /// P(|T| >= |t|).
    #[default]
    #[serde(rename = "two-tailed")]
    TwoTailed,
    /// P(T >= t).
    #[serde(rename = "high")]
    High,
    /// P(T <= t).
    #[serde(rename = "low")]
    Low,
}

impl Tails {
    /// Name accepted by [`Tails::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoTailed => "two-tailed",
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl FromStr for Tails {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "two-tailed" => Ok(Self::TwoTailed),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            other => Err(EvalError::InvalidArgument(format!(
                "unknown tail mode '{}'; valid modes are 'two-tailed', 'high' and 'low'",
                other
            ))),
        }
    }
}

impl fmt::Display for Tails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Correlation coefficient and its p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Correlation coefficient in [-1, 1].
    pub r: f64,
    /// Significance of `r`.
    pub p_value: f64,
}

impl CorrelationResult {
    /// (r, p) tuple.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.r, self.p_value)
    }
}

impl fmt::Display for CorrelationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r = {:.4}, p = {:.4e}", self.r, self.p_value)
    }
}

/// Pearson correlation of `x` and `y` with a two-tailed p-value.
///
/// The p-value comes from t = r * sqrt(df / (1 - r^2)) on a Student's t
/// distribution with df = n - 2. A perfect correlation (|r| = 1) has p = 0;
/// a constant series has r = 0 and p = 1.
///
/// # Errors
/// `InputSize` if the lengths differ or fewer than 3 pairs are given;
/// `InvalidArgument` if any value is NaN or infinite.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    let n = check_correlation_input(x, y)?;
    let r = pearson_r(x, y);
    let df = (n - 2) as f64;

    let p_value = if r.abs() >= 1.0 {
        0.0
    } else {
        let t = r * (df / (1.0 - r * r)).sqrt();
        t_probability(t, df, Tails::TwoTailed)?
    };

    log::debug!("pearson: n = {}, r = {}, p = {}", n, r, p_value);
    Ok(CorrelationResult { r, p_value })
}

/// Pearson correlation coefficient alone.
///
/// Returns 0.0 if either series has zero variance. Rounding drift outside
/// [-1, 1] is clamped.
pub(crate) fn pearson_r(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    (cov / denom).clamp(-1.0, 1.0)
}

/// Tail probability of a t statistic with `df` degrees of freedom.
///
/// # Errors
/// `InvalidArgument` if `t` is NaN or `df` is not positive.
pub fn t_probability(t: f64, df: f64, tails: Tails) -> Result<f64> {
    if t.is_nan() {
        return Err(EvalError::InvalidArgument("t statistic is NaN".to_string()));
    }
    let t_dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
        EvalError::InvalidArgument(format!("t-distribution with df = {}: {}", df, e))
    })?;

    let p = match tails {
        Tails::TwoTailed => 2.0 * (1.0 - t_dist.cdf(t.abs())),
        Tails::High => 1.0 - t_dist.cdf(t),
        Tails::Low => t_dist.cdf(t),
    };
    Ok(p.clamp(0.0, 1.0))
}

/// Validate a pair of series for correlation and return their length.
pub(crate) fn check_correlation_input(x: &[f64], y: &[f64]) -> Result<usize> {
    check_paired(x, y)?;
    if x.len() < 3 {
        return Err(EvalError::InputSize(format!(
            "correlation needs at least 3 pairs for positive degrees of freedom, got {}",
            x.len()
        )));
    }
    if let Some(pos) = x.iter().chain(y.iter()).position(|v| !v.is_finite()) {
        let (series, idx) = if pos < x.len() { ("x", pos) } else { ("y", pos - x.len()) };
        return Err(EvalError::InvalidArgument(format!(
            "correlation input {}[{}] is not finite",
            series, idx
        )));
    }
    Ok(x.len())
}
