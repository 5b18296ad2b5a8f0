//! Chart selection
//!
//! A front end asks for one chart kind per refresh; `ChartData::build`
//! runs the matching pipeline over the snapshot.

use serde::{Deserialize, Serialize};

use crate::boxplot::BoxPlot;
use crate::density::DensityOverlay;
use crate::histogram::{BinCount, Histogram};

/// Which chart to prepare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Histogram,
    Boxplot,
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram",
            ChartKind::Boxplot => "Boxplot",
        }
    }
}

/// Chart options chosen by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartRequest {
    pub kind: ChartKind,
    /// Bucket count, histogram only
    pub bins: BinCount,
    /// Draw the KDE overlay, histogram only
    pub show_density: bool,
}

/// Chart-ready data for one refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartData {
    /// No observations yet
    Empty,
    Histogram {
        histogram: Histogram,
        density: Option<DensityOverlay>,
    },
    Boxplot(BoxPlot),
}

impl ChartData {
    pub fn build(data: &[f64], request: &ChartRequest) -> Self {
        if data.is_empty() {
            return ChartData::Empty;
        }

        match request.kind {
            ChartKind::Histogram => {
                let histogram = Histogram::compute(data, request.bins);
                let density = if request.show_density {
                    DensityOverlay::build(data, &histogram)
                } else {
                    None
                };
                ChartData::Histogram { histogram, density }
            }
            ChartKind::Boxplot => match BoxPlot::compute(data) {
                Some(plot) => ChartData::Boxplot(plot),
                None => ChartData::Empty,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartData::Empty)
    }
}
