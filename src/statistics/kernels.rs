//! Slice-level statistical kernels
//!
//! Each kernel works on one non-empty 1-D run of values. Emptiness is checked
//! by the callers before any kernel runs.

use ndarray::ArrayView1;

/// Slices longer than this are summed pairwise instead of naively.
pub const PAIRWISE_THRESHOLD: usize = 10_000;

/// Block size below which pairwise summation falls back to a plain loop.
pub const PAIRWISE_BLOCK: usize = 128;

/// Sum of `f(x)` over `values`, pairwise above [`PAIRWISE_THRESHOLD`].
pub fn sum_by<F>(values: &[f64], f: F) -> f64
where
    F: Fn(f64) -> f64 + Copy,
{
    if values.len() <= PAIRWISE_THRESHOLD {
        values.iter().map(|&x| f(x)).sum()
    } else {
        pairwise_sum_by(values, f)
    }
}

/// Sum of `values`, pairwise above [`PAIRWISE_THRESHOLD`].
pub fn sum(values: &[f64]) -> f64 {
    sum_by(values, |x| x)
}

fn pairwise_sum_by<F>(values: &[f64], f: F) -> f64
where
    F: Fn(f64) -> f64 + Copy,
{
    if values.len() <= PAIRWISE_BLOCK {
        return values.iter().map(|&x| f(x)).sum();
    }
    let (left, right) = values.split_at(values.len() / 2);
    pairwise_sum_by(left, f) + pairwise_sum_by(right, f)
}

/// Arithmetic mean. NaN in the input yields NaN.
pub fn mean(values: &[f64]) -> f64 {
    sum(values) / values.len() as f64
}

/// Population variance around a given mean (two-pass, second pass only).
pub fn variance(values: &[f64], mean: f64) -> f64 {
    sum_by(values, |x| {
        let deviation = x - mean;
        deviation * deviation
    }) / values.len() as f64
}

/// Ascending copy of `values`, or `None` if any value is NaN.
pub fn sorted_copy(values: &[f64]) -> Option<Vec<f64>> {
    if values.iter().any(|x| x.is_nan()) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Some(sorted)
}

/// Median of a sorted, non-empty slice.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Linear-interpolation percentile of a sorted, non-empty slice, `p` in `[0, 100]`.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Median of an unsorted slice; NaN if any value is NaN.
pub fn median(values: &[f64]) -> f64 {
    sorted_copy(values).map_or(f64::NAN, |sorted| median_sorted(&sorted))
}

/// Percentile of an unsorted slice; NaN if any value is NaN.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    sorted_copy(values).map_or(f64::NAN, |sorted| percentile_sorted(&sorted, p))
}

/// Run `f` on a lane as a contiguous slice, copying only when the lane is strided.
pub fn with_lane_slice<R>(lane: ArrayView1<'_, f64>, f: impl FnOnce(&[f64]) -> R) -> R {
    match lane.as_slice() {
        Some(values) => f(values),
        None => {
            let owned = lane.to_vec();
            f(&owned)
        }
    }
}
