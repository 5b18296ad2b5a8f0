//! Sample quantiles
//!
//! Uses linear interpolation between closest ranks: the p-quantile of a
//! sorted sample of length n sits at fractional position (n - 1) * p.

use std::cmp::Ordering;

/// Sort finite values ascending. Non-finite values are dropped.
pub fn sorted_finite(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Quantile of already-sorted data.
///
/// Returns `None` for empty data or `p` outside [0, 1].
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }

    let pos = (sorted.len() - 1) as f64 * p;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Quantile of unsorted data.
pub fn quantile(data: &[f64], p: f64) -> Option<f64> {
    quantile_sorted(&sorted_finite(data), p)
}

/// Median of already-sorted data.
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    quantile_sorted(sorted, 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&data, 0.0), Some(1.0));
        assert_eq!(quantile(&data, 0.25), Some(1.75));
        assert_eq!(quantile(&data, 0.5), Some(2.5));
        assert_eq!(quantile(&data, 0.75), Some(3.25));
        assert_eq!(quantile(&data, 1.0), Some(4.0));
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median_sorted(&[1.0, 5.0, 9.0]), Some(5.0));
        assert_eq!(median_sorted(&[1.0, 5.0, 9.0, 11.0]), Some(7.0));
        assert_eq!(median_sorted(&[3.0]), Some(3.0));
    }

    #[test]
    fn test_quantile_unsorted_input() {
        assert_eq!(quantile(&[9.0, 1.0, 5.0], 0.5), Some(5.0));
    }

    #[test]
    fn test_quantile_out_of_range() {
        assert!(quantile(&[], 0.5).is_none());
        assert!(quantile(&[1.0], -0.1).is_none());
        assert!(quantile(&[1.0], 1.1).is_none());
        assert!(quantile(&[1.0], f64::NAN).is_none());
    }

    #[test]
    fn test_sorted_finite_drops_nan() {
        assert_eq!(sorted_finite(&[3.0, f64::NAN, 1.0, f64::INFINITY]), vec![1.0, 3.0]);
    }
}
