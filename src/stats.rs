//! Null-distribution statistics: z-scores, p-values, FDR correction.
//!
//! Degenerate inputs follow the propagation policy of the whole crate:
//! an empty null or a NaN observation yields NaN (so one broken
//! compound/threshold combination reports "unavailable" instead of failing
//! a batch), and a zero-variance null yields the documented z = 0 sentinel.

use statrs::function::erf::erfc;

/// Which side of the null distribution counts as extreme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tail {
    /// Observed larger than null (e.g. influence scores).
    Greater,
    /// Observed smaller than null (e.g. proximity distances).
    Less,
    TwoSided,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor n, matching the permutation
/// literature's z-score convention).
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// `z = (obs - mean(null)) / std(null)`.
///
/// A zero-variance null returns 0.0 by convention; that is a sentinel, not a
/// real z-score, and consumers should cross-check `std_dev(null) == 0`
/// before trusting it. NaN observation or empty null propagates NaN.
pub fn z_score(observed: f64, null: &[f64]) -> f64 {
    if observed.is_nan() || null.is_empty() {
        return f64::NAN;
    }
    let sd = std_dev(null);
    if sd > 0.0 {
        (observed - mean(null)) / sd
    } else {
        0.0
    }
}

/// Parametric p-value from a z-score via the standard normal CDF.
///
/// `Greater`: `1 - Φ(z)`; `Less`: `Φ(z)`; `TwoSided`: `2·(1 - Φ(|z|))`.
pub fn p_from_z(z: f64, tail: Tail) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    // Φ(z) = erfc(-z/√2) / 2, numerically stable in both tails.
    let sqrt2 = std::f64::consts::SQRT_2;
    match tail {
        Tail::Greater => 0.5 * erfc(z / sqrt2),
        Tail::Less => 0.5 * erfc(-z / sqrt2),
        Tail::TwoSided => erfc(z.abs() / sqrt2),
    }
}

/// Empirical permutation p-value `(r + 1) / (n + 1)`.
///
/// `r` counts null values at least as extreme as `observed` in the chosen
/// tail; the two-sided form is `min(1, 2·min(p_less, p_greater))`. The
/// `+1` terms keep the result strictly above 0 for any finite null, which
/// downstream FDR/log machinery depends on. NaN observation or empty null
/// propagates NaN.
pub fn empirical_p(observed: f64, null: &[f64], tail: Tail) -> f64 {
    if observed.is_nan() || null.is_empty() {
        return f64::NAN;
    }
    let n = null.len() as f64;
    let at_least = |extreme: &dyn Fn(f64) -> bool| {
        (null.iter().filter(|&&v| extreme(v)).count() as f64 + 1.0) / (n + 1.0)
    };
    match tail {
        Tail::Greater => at_least(&|v| v >= observed),
        Tail::Less => at_least(&|v| v <= observed),
        Tail::TwoSided => {
            let p_less = at_least(&|v| v <= observed);
            let p_greater = at_least(&|v| v >= observed);
            (2.0 * p_less.min(p_greater)).min(1.0)
        }
    }
}

/// Benjamini-Hochberg FDR adjustment.
///
/// Output is component-wise >= the input, capped at 1, and monotone
/// non-decreasing over the input sorted ascending. Non-finite entries come
/// back as NaN and are excluded from the number of tests.
pub fn benjamini_hochberg(p_values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..p_values.len()).filter(|&i| p_values[i].is_finite()).collect();
    let m = order.len() as f64;
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![f64::NAN; p_values.len()];
    let mut running_min = 1.0f64;
    for (rank, &i) in order.iter().enumerate().rev() {
        let candidate = p_values[i] * m / (rank as f64 + 1.0);
        running_min = running_min.min(candidate).min(1.0);
        adjusted[i] = running_min;
    }
    adjusted
}

/// Sorted-slice quantile with linear interpolation between order statistics.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let h = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
