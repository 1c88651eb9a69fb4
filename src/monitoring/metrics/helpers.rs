//! Helper functions for metrics calculations

/// Nearest-rank percentile over ascending `sorted_values`.
///
/// Selects the element at index `ceil(percentile / 100 * n) - 1`. Fewer than two
/// samples yield 0.
pub(crate) fn nearest_rank(sorted_values: &[f64], percentile: u32) -> f64 {
    let n = sorted_values.len();
    if n < 2 {
        return 0.0;
    }

    let rank = (percentile as usize * n).div_ceil(100);
    let index = rank.saturating_sub(1).min(n - 1);
    sorted_values[index]
}

/// Sort durations ascending, dropping non-finite values
pub(super) fn sorted_finite<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Calculate average of f64 values
pub(crate) fn calculate_average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// `part / whole * 100`, or 0 when `whole` is zero
pub(crate) fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
