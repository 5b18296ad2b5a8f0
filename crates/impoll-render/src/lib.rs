//! impoll-render - Chart-ready data structures
//!
//! Turns a snapshot of values into structures a chart renderer can draw
//! directly. Nothing here draws; the terminal app and any other front end
//! consume these types.
//!
//! - **Histogram**: equal-width bins over [min, max], last bin closed
//! - **GaussianKde** / **DensityOverlay**: Scott's-rule KDE sampled at 500
//!   points and rescaled to the tallest bin
//! - **BoxPlot**: five-number summary with 1.5 x IQR whiskers and outliers
//! - **ChartData**: one of the above, chosen by a `ChartRequest`

pub mod boxplot;
pub mod chart;
pub mod density;
pub mod error;
pub mod histogram;
pub mod kde;

pub use boxplot::*;
pub use chart::*;
pub use density::*;
pub use error::*;
pub use histogram::*;
pub use kde::*;

/// `num` evenly spaced samples over [start, stop], both ends included.
pub(crate) fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            // Divide before subtracting so spans wider than f64::MAX stay finite
            let n = (num - 1) as f64;
            let step = stop / n - start / n;
            let mut points: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            points[num - 1] = stop;
            points
        }
    }
}
