//! Gaussian kernel density estimation
//!
//! Bandwidth follows Scott's rule for one dimension: the kernel standard
//! deviation is the sample standard deviation (N - 1) scaled by N^(-1/5).

use serde::{Deserialize, Serialize};

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// A fitted Gaussian KDE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a KDE to `data`.
    ///
    /// Returns `None` when the estimate is undefined: fewer than two
    /// values, any non-finite value, or zero spread.
    pub fn fit(data: &[f64]) -> Option<Self> {
        let n = data.len();
        if n < 2 || data.iter().any(|x| !x.is_finite()) {
            return None;
        }

        let nf = n as f64;
        let mean = data.iter().sum::<f64>() / nf;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (nf - 1.0);
        let bandwidth = variance.sqrt() * Self::scott_factor(n);

        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return None;
        }

        Some(Self {
            points: data.to_vec(),
            bandwidth,
        })
    }

    /// Scott's bandwidth factor for a one-dimensional sample of size `n`.
    pub fn scott_factor(n: usize) -> f64 {
        (n as f64).powf(-0.2)
    }

    /// Kernel standard deviation
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Estimated density at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let h = self.bandwidth;
        let sum: f64 = self
            .points
            .iter()
            .map(|&xi| {
                let u = (x - xi) / h;
                (-0.5 * u * u).exp()
            })
            .sum();
        sum * INV_SQRT_2PI / (h * self.points.len() as f64)
    }

    /// Estimated density at each of `xs`.
    pub fn evaluate_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }
}
