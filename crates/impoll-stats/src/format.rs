//! Display formatting for statistics

use serde::{Deserialize, Serialize};

/// Shown in place of undefined or non-finite results.
pub const PLACEHOLDER: &str = "—";

/// One entry of the statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Count,
    Mean,
    Median,
    Variance,
    StdDev,
    Skewness,
    ExcessKurtosis,
    Min,
    Max,
}

impl Statistic {
    /// Panel order.
    pub const ALL: [Statistic; 9] = [
        Statistic::Count,
        Statistic::Mean,
        Statistic::Median,
        Statistic::Variance,
        Statistic::StdDev,
        Statistic::Skewness,
        Statistic::ExcessKurtosis,
        Statistic::Min,
        Statistic::Max,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Statistic::Count => "N",
            Statistic::Mean => "Mean",
            Statistic::Median => "Median",
            Statistic::Variance => "Variance",
            Statistic::StdDev => "SD",
            Statistic::Skewness => "Skewness",
            Statistic::ExcessKurtosis => "Kurtosis (excess)",
            Statistic::Min => "Min",
            Statistic::Max => "Max",
        }
    }

    /// Fixed number of decimals used when displaying this statistic.
    pub fn decimals(self) -> usize {
        match self {
            Statistic::Count => 0,
            Statistic::Mean
            | Statistic::Median
            | Statistic::StdDev
            | Statistic::Min
            | Statistic::Max => 2,
            Statistic::Variance | Statistic::Skewness | Statistic::ExcessKurtosis => 3,
        }
    }
}

/// Format a value with fixed decimals, trimming trailing zeros.
///
/// `None` and non-finite values render as [`PLACEHOLDER`]. With zero
/// decimals the value is rounded to an integer.
pub fn format_value(value: Option<f64>, decimals: usize) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return PLACEHOLDER.to_string(),
    };

    if decimals == 0 {
        return format!("{}", value.round() as i64);
    }

    let formatted = format!("{:.*}", decimals, value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_zeros_stripped() {
        assert_eq!(format_value(Some(6.0), 2), "6");
        assert_eq!(format_value(Some(2.5), 3), "2.5");
        assert_eq!(format_value(Some(1.581_138_8), 2), "1.58");
        assert_eq!(format_value(Some(100.0), 2), "100");
        assert_eq!(format_value(Some(0.0), 3), "0");
    }

    #[test]
    fn test_rounding_to_precision() {
        assert_eq!(format_value(Some(1.999), 2), "2");
        assert_eq!(format_value(Some(-0.1234), 3), "-0.123");
        assert_eq!(format_value(Some(7.25), 3), "7.25");
    }

    #[test]
    fn test_zero_decimals_rounds() {
        assert_eq!(format_value(Some(5.0), 0), "5");
        assert_eq!(format_value(Some(4.6), 0), "5");
        assert_eq!(format_value(Some(0.0), 0), "0");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(format_value(None, 2), PLACEHOLDER);
        assert_eq!(format_value(Some(f64::NAN), 2), PLACEHOLDER);
        assert_eq!(format_value(Some(f64::INFINITY), 0), PLACEHOLDER);
    }

    #[test]
    fn test_precision_table() {
        assert_eq!(Statistic::Count.decimals(), 0);
        assert_eq!(Statistic::StdDev.decimals(), 2);
        assert_eq!(Statistic::ExcessKurtosis.decimals(), 3);
        assert_eq!(Statistic::ALL.len(), 9);
    }
}
