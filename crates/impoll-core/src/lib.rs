//! impoll-core - Live classroom dashboard service
//!
//! The surface a front end calls:
//!
//! - [`Dashboard::submit_value`]: validate raw input and store it
//! - [`Dashboard::reset_all`]: clear everything, given a confirmation token
//! - [`Dashboard::get_snapshot`]: ordered observations, optionally the most recent N
//! - [`Dashboard::view`]: one refresh cycle (statistics + chart data)
//! - [`RefreshLoop`]: pull-based polling of `view` on a fixed interval
//!
//! The store is injected, so several dashboards (one per session) can share
//! a single [`impoll_store::ValueStore`].

pub mod config;
pub mod dashboard;
pub mod error;
pub mod refresh;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardView, RawValue, ResetConfirmation, Snapshot, ViewOptions};
pub use error::{ConfigError, DashboardError, InvalidReason, Result};
pub use refresh::RefreshLoop;

pub use impoll_render::{BinCount, BoxPlot, ChartData, ChartKind, ChartRequest, DensityOverlay, Histogram};
pub use impoll_stats::{format_value, DescriptiveStats, Statistic, PLACEHOLDER};
pub use impoll_store::{Observation, SqliteValueStore, StoreError, ValueStore};
