//! Equal-width histogram binning
//!
//! Bins span [min, max] of the data. Every bin is half-open `[lo, hi)`
//! except the last, which is closed so the maximum is counted. Counts
//! always sum to the number of finite values.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::linspace;

/// Validated number of histogram buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BinCount(usize);

impl BinCount {
    pub const MIN: usize = 5;
    pub const MAX: usize = 60;
    pub const DEFAULT: usize = 15;

    pub fn new(bins: usize) -> Result<Self, RenderError> {
        if (Self::MIN..=Self::MAX).contains(&bins) {
            Ok(Self(bins))
        } else {
            Err(RenderError::InvalidBinCount(bins))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BinCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<usize> for BinCount {
    type Error = RenderError;

    fn try_from(bins: usize) -> Result<Self, Self::Error> {
        Self::new(bins)
    }
}

impl From<BinCount> for usize {
    fn from(bins: BinCount) -> Self {
        bins.0
    }
}

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Bucketed counts for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, one more than the number of bins
    edges: Vec<f64>,
    /// Observations per bin
    counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite values of `data` into `bins` equal-width buckets.
    ///
    /// Constant data is centred in a range widened by 0.5 on each side;
    /// empty data yields zero counts over [0, 1].
    pub fn compute(data: &[f64], bins: BinCount) -> Self {
        let nbins = bins.get();
        let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();

        let (lo, hi) = match range_of(&finite) {
            None => (0.0, 1.0),
            Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
            Some(range) => range,
        };

        let edges = linspace(lo, hi, nbins + 1);
        let mut counts = vec![0usize; nbins];
        // Halved so that hi - lo cannot overflow
        let half_span = hi * 0.5 - lo * 0.5;

        for &x in &finite {
            let position = (x * 0.5 - lo * 0.5) / half_span * nbins as f64;
            let mut idx = (position as usize).min(nbins - 1);
            // The float estimate can land one bin off near an edge
            if x < edges[idx] && idx > 0 {
                idx -= 1;
            } else if idx + 1 < nbins && x >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        Self { edges, counts }
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no observation was binned
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Height of the tallest bar
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Width shared by every bin
    pub fn bin_width(&self) -> f64 {
        let n = self.len() as f64;
        self.edges[self.edges.len() - 1] / n - self.edges[0] / n
    }

    pub fn bins(&self) -> Vec<Bin> {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| Bin {
                lower: self.edges[i],
                upper: self.edges[i + 1],
                count,
            })
            .collect()
    }
}

fn range_of(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}
