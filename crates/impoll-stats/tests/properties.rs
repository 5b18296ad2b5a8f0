//! Property-based tests for descriptive statistics

use impoll_stats::{format_value, DescriptiveStats, Statistic, PLACEHOLDER};
use proptest::prelude::*;

fn naive_sample_variance(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)
}

proptest! {
    #[test]
    fn test_variance_is_sample_variance(data in prop::collection::vec(-1e6f64..1e6, 2..200)) {
        let stats = DescriptiveStats::from_values(&data);
        let expected = naive_sample_variance(&data);
        let got = stats.variance.unwrap();
        let tolerance = 1e-9 * expected.abs().max(1e-300);
        prop_assert!((got - expected).abs() <= tolerance, "got {} expected {}", got, expected);
        prop_assert!((stats.std_dev.unwrap() - expected.sqrt()).abs() <= 1e-9 * expected.sqrt().max(1e-300));
    }

    #[test]
    fn test_definedness_follows_sample_size(data in prop::collection::vec(-100.0f64..100.0, 0..8)) {
        let stats = DescriptiveStats::from_values(&data);
        let n = data.len();
        prop_assert_eq!(stats.count, n);
        prop_assert_eq!(stats.mean.is_some(), n >= 1);
        prop_assert_eq!(stats.min.is_some(), n >= 1);
        if n < 2 {
            prop_assert!(stats.variance.is_none());
            prop_assert!(stats.std_dev.is_none());
        }
        if n < 3 {
            prop_assert!(stats.skewness.is_none());
        }
        if n < 4 {
            prop_assert!(stats.excess_kurtosis.is_none());
        }
    }

    #[test]
    fn test_median_between_min_and_max(data in prop::collection::vec(-1e3f64..1e3, 1..100)) {
        let stats = DescriptiveStats::from_values(&data);
        let (min, median, max) = (stats.min.unwrap(), stats.median.unwrap(), stats.max.unwrap());
        prop_assert!(min <= median && median <= max);
    }

    #[test]
    fn test_formatted_values_never_end_in_zero_decimal(v in -1e4f64..1e4, decimals in 1usize..4) {
        let s = format_value(Some(v), decimals);
        prop_assert!(s != PLACEHOLDER);
        if s.contains('.') {
            prop_assert!(!s.ends_with('0') && !s.ends_with('.'));
        }
    }
}

#[test]
fn test_rows_cover_every_statistic() {
    let rows = DescriptiveStats::from_values(&[1.0, 2.0]).rows();
    let stats: Vec<Statistic> = rows.iter().map(|(s, _)| *s).collect();
    assert_eq!(stats, Statistic::ALL.to_vec());
}
