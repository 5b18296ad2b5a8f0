//! KDE overlay for the histogram
//!
//! The density curve is rescaled so its peak matches the tallest bar.
//! That makes it comparable to the bars by eye; it is not a statistical
//! transformation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::histogram::Histogram;
use crate::kde::GaussianKde;
use crate::linspace;

/// Samples of the scaled density curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityOverlay {
    /// Sample positions, evenly spaced over [min, max]
    pub xs: Vec<f64>,
    /// Density at each position, multiplied by `scale`
    pub ys: Vec<f64>,
    /// Factor applied to the raw density
    pub scale: f64,
}

impl DensityOverlay {
    /// Number of points sampled across [min, max]
    pub const SAMPLES: usize = 500;

    /// Build the overlay for `data` drawn over `histogram`.
    ///
    /// Returns `None` when the KDE cannot be fitted; the caller still draws
    /// the histogram.
    pub fn build(data: &[f64], histogram: &Histogram) -> Option<Self> {
        let Some(kde) = GaussianKde::fit(data) else {
            debug!(n = data.len(), "density overlay omitted");
            return None;
        };

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let xs = linspace(min, max, Self::SAMPLES);
        let raw = kde.evaluate_many(&xs);

        let peak = raw.iter().copied().fold(0.0, f64::max);
        let scale = if peak > 0.0 {
            histogram.max_count() as f64 / peak
        } else {
            1.0
        };

        Some(Self {
            ys: raw.iter().map(|y| y * scale).collect(),
            xs,
            scale,
        })
    }

    /// Highest point of the scaled curve
    pub fn peak(&self) -> f64 {
        self.ys.iter().copied().fold(0.0, f64::max)
    }
}
