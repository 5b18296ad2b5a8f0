//! Descriptive statistics for a value snapshot
//!
//! Provides the statistics shown next to the live chart:
//! - Count, mean, median, min, max
//! - Sample variance and standard deviation (N - 1 denominator)
//! - Bias-corrected skewness and Fisher excess kurtosis

use serde::{Deserialize, Serialize};

use crate::format::{format_value, Statistic};
use crate::quantile::{median_sorted, sorted_finite};

/// Decimal resolution of f64 (10^-15).
const FLOAT_RESOLUTION: f64 = 1e-15;

/// Descriptive statistics for a numeric sample.
///
/// A `None` field means the sample is too small (or too degenerate) for the
/// statistic to be defined.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Number of values
    pub count: usize,
    /// Arithmetic mean (N >= 1)
    pub mean: Option<f64>,
    /// Median (N >= 1)
    pub median: Option<f64>,
    /// Sample variance (N >= 2)
    pub variance: Option<f64>,
    /// Sample standard deviation (N >= 2)
    pub std_dev: Option<f64>,
    /// Bias-corrected sample skewness (N >= 3)
    pub skewness: Option<f64>,
    /// Bias-corrected excess kurtosis, 0 for a normal distribution (N >= 4)
    pub excess_kurtosis: Option<f64>,
    /// Minimum value (N >= 1)
    pub min: Option<f64>,
    /// Maximum value (N >= 1)
    pub max: Option<f64>,
}

impl DescriptiveStats {
    /// Compute statistics from data. Non-finite values are ignored.
    pub fn from_values(data: &[f64]) -> Self {
        let sorted = sorted_finite(data);
        let count = sorted.len();
        if count == 0 {
            return Self::default();
        }

        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;

        // Central moments m_k = sum((x - mean)^k) / n
        let (m2, m3, m4) = sorted.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), &x| {
            let d = x - mean;
            let d2 = d * d;
            (m2 + d2, m3 + d2 * d, m4 + d2 * d2)
        });
        let (m2, m3, m4) = (m2 / n, m3 / n, m4 / n);

        let variance = (count >= 2).then(|| m2 * n / (n - 1.0));
        let std_dev = variance.map(f64::sqrt);

        // Spread lost in rounding noise: shape statistics are undefined.
        let degenerate = m2 <= (FLOAT_RESOLUTION * mean).powi(2);

        let skewness = (count >= 3 && !degenerate).then(|| {
            let g1 = m3 / m2.powf(1.5);
            g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
        });

        let excess_kurtosis = (count >= 4 && !degenerate).then(|| {
            let g2 = m4 / (m2 * m2) - 3.0;
            ((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
        });

        Self {
            count,
            mean: finite(Some(mean)),
            median: finite(median_sorted(&sorted)),
            variance: finite(variance),
            std_dev: finite(std_dev),
            skewness: finite(skewness),
            excess_kurtosis: finite(excess_kurtosis),
            min: sorted.first().copied(),
            max: sorted.last().copied(),
        }
    }

    /// True when no values were available.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Raw value of a single statistic.
    pub fn get(&self, stat: Statistic) -> Option<f64> {
        match stat {
            Statistic::Count => Some(self.count as f64),
            Statistic::Mean => self.mean,
            Statistic::Median => self.median,
            Statistic::Variance => self.variance,
            Statistic::StdDev => self.std_dev,
            Statistic::Skewness => self.skewness,
            Statistic::ExcessKurtosis => self.excess_kurtosis,
            Statistic::Min => self.min,
            Statistic::Max => self.max,
        }
    }

    /// Display rows in panel order, each value formatted at its precision.
    pub fn rows(&self) -> Vec<(Statistic, String)> {
        Statistic::ALL
            .iter()
            .map(|&stat| (stat, format_value(self.get(stat), stat.decimals())))
            .collect()
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
