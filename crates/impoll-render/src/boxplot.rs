//! Box-and-whisker summary
//!
//! Quartiles use linear interpolation. Whiskers reach to the most extreme
//! data points within 1.5 x IQR of the box; anything beyond is an outlier.

use serde::{Deserialize, Serialize};

use impoll_stats::{quantile_sorted, sorted_finite};

/// Five number summary statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Get the interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Get the range
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Everything needed to draw one horizontal boxplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlot {
    pub summary: FiveNumberSummary,
    /// Whisker reach as a multiple of the IQR
    pub whisker_multiplier: f64,
    /// Q1 - k * IQR
    pub lower_fence: f64,
    /// Q3 + k * IQR
    pub upper_fence: f64,
    /// Smallest value inside the lower fence
    pub whisker_low: f64,
    /// Largest value inside the upper fence
    pub whisker_high: f64,
    /// Values outside the whiskers, ascending
    pub outliers: Vec<f64>,
}

impl BoxPlot {
    pub const WHISKER_MULTIPLIER: f64 = 1.5;

    /// Boxplot with the standard 1.5 x IQR whiskers. `None` for empty data.
    pub fn compute(data: &[f64]) -> Option<Self> {
        Self::with_whiskers(data, Self::WHISKER_MULTIPLIER)
    }

    /// Boxplot with whiskers at `k` x IQR.
    pub fn with_whiskers(data: &[f64], k: f64) -> Option<Self> {
        let sorted = sorted_finite(data);
        let (&min, &max) = (sorted.first()?, sorted.last()?);

        let summary = FiveNumberSummary {
            min,
            q1: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            q3: quantile_sorted(&sorted, 0.75)?,
            max,
        };

        let iqr = summary.iqr();
        let lower_fence = summary.q1 - k * iqr;
        let upper_fence = summary.q3 + k * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&x| x >= lower_fence)
            .unwrap_or(summary.q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&x| x <= upper_fence)
            .unwrap_or(summary.q3);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|&x| x < whisker_low || x > whisker_high)
            .collect();

        Some(Self {
            summary,
            whisker_multiplier: k,
            lower_fence,
            upper_fence,
            whisker_low,
            whisker_high,
            outliers,
        })
    }

    pub fn has_outliers(&self) -> bool {
        !self.outliers.is_empty()
    }
}
