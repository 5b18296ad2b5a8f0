//! Dashboard service: the data-access surface for front ends

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use impoll_render::{ChartData, ChartRequest};
use impoll_stats::{format_value, DescriptiveStats, Statistic};
use impoll_store::{values_of, Observation, SqliteValueStore, ValueStore};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, InvalidReason, Result};

/// Input as it arrives from a form field or a numeric widget
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        RawValue::Text(text)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl RawValue {
    /// Parse into a finite number.
    ///
    /// Text is trimmed; a lone decimal comma (`7,5`) is read as a point.
    pub fn parse(&self) -> Result<f64> {
        let (input, value) = match self {
            RawValue::Number(v) => (v.to_string(), *v),
            RawValue::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(invalid(text, InvalidReason::Missing));
                }
                let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
                    trimmed.replacen(',', ".", 1)
                } else {
                    trimmed.to_string()
                };
                let value = normalized
                    .parse::<f64>()
                    .map_err(|_| invalid(text, InvalidReason::NotNumeric))?;
                (text.clone(), value)
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid(&input, InvalidReason::NonFinite))
        }
    }
}

fn invalid(input: &str, reason: InvalidReason) -> DashboardError {
    DashboardError::InvalidValue {
        input: input.to_string(),
        reason,
    }
}

/// Proof that the user confirmed a full reset.
///
/// Front ends own the confirmation step; this token only exists once they
/// have performed it.
#[derive(Debug, Clone, Copy)]
pub struct ResetConfirmation {
    _confirmed: (),
}

impl ResetConfirmation {
    pub fn confirmed() -> Self {
        Self { _confirmed: () }
    }
}

/// Immutable copy of the store contents at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub observations: Vec<Observation>,
    pub taken_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn values(&self) -> Vec<f64> {
        values_of(&self.observations)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// What a viewer has selected for one refresh
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub chart: ChartRequest,
    /// How many recent values to list
    pub recent_count: NonZeroUsize,
    pub variable_label: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        DashboardConfig::default().view_options()
    }
}

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub variable_label: String,
    pub total: usize,
    pub stats: DescriptiveStats,
    /// Formatted statistics panel, in display order
    pub stat_rows: Vec<(Statistic, String)>,
    pub chart: ChartData,
    /// Most recent values, newest first, formatted to 2 decimals
    pub recent: Vec<String>,
    pub taken_at: DateTime<Utc>,
}

/// Handle used by one client session. Cheap to clone.
#[derive(Clone)]
pub struct Dashboard {
    store: Arc<dyn ValueStore>,
}

impl Dashboard {
    pub fn new(store: Arc<dyn ValueStore>) -> Self {
        Self { store }
    }

    /// Open the SQLite store named by the configuration.
    pub fn open(config: &DashboardConfig) -> Result<Self> {
        let store = SqliteValueStore::open(&config.database)?;
        Ok(Self::new(Arc::new(store)))
    }

    pub fn store(&self) -> &Arc<dyn ValueStore> {
        &self.store
    }

    /// Validate and store one submission.
    ///
    /// Rejected input never reaches the store.
    pub fn submit_value(&self, raw: impl Into<RawValue>) -> Result<Observation> {
        let raw = raw.into();
        let value = raw.parse().map_err(|err| {
            warn!(?raw, "rejected submission");
            err
        })?;
        Ok(self.store.insert(value)?)
    }

    /// Remove every observation.
    pub fn reset_all(&self, _confirmation: ResetConfirmation) -> Result<()> {
        self.store.clear()?;
        info!("dashboard reset");
        Ok(())
    }

    /// All observations, or only the most recent `recent_limit`, ascending id.
    pub fn get_snapshot(&self, recent_limit: Option<NonZeroUsize>) -> Result<Snapshot> {
        let observations = match recent_limit {
            Some(n) => self.store.read_recent(n)?,
            None => self.store.read_all()?,
        };
        Ok(Snapshot {
            observations,
            taken_at: Utc::now(),
        })
    }

    /// Run one refresh cycle: snapshot, statistics, chart data.
    pub fn view(&self, options: &ViewOptions) -> Result<DashboardView> {
        let snapshot = self.get_snapshot(None)?;
        Ok(Self::render(&snapshot, options))
    }

    /// Build a view from an existing snapshot.
    pub fn render(snapshot: &Snapshot, options: &ViewOptions) -> DashboardView {
        let values = snapshot.values();
        let stats = DescriptiveStats::from_values(&values);
        let chart = ChartData::build(&values, &options.chart);
        let recent = values
            .iter()
            .rev()
            .take(options.recent_count.get())
            .map(|&v| format_value(Some(v), 2))
            .collect();

        DashboardView {
            variable_label: options.variable_label.clone(),
            total: snapshot.len(),
            stat_rows: stats.rows(),
            stats,
            chart,
            recent,
            taken_at: snapshot.taken_at,
        }
    }
}
