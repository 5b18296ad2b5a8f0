//! Configuration for impoll
//!
//! Loaded from a TOML file with the following structure:
//!
//! ```toml
//! database = "data.db"
//! variable_label = "Hours of sleep"
//! recent_count = 10
//! refresh_interval_ms = 2000
//! auto_refresh = true
//!
//! [chart]
//! kind = "histogram"
//! bins = 15
//! show_density = false
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use impoll_render::ChartRequest;

use crate::dashboard::ViewOptions;
use crate::error::ConfigError;

/// Dashboard-wide configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// SQLite file holding the `entries` table
    pub database: PathBuf,
    /// Name of the variable being collected, shown as the chart title
    pub variable_label: String,
    /// How many recent values to list
    pub recent_count: usize,
    /// Polling interval for live refresh, in milliseconds
    pub refresh_interval_ms: u64,
    /// Whether front ends should poll automatically
    pub auto_refresh: bool,
    /// Initial chart options
    pub chart: ChartRequest,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("data.db"),
            variable_label: "Hours of sleep".to_string(),
            recent_count: 10,
            refresh_interval_ms: 2000,
            auto_refresh: true,
            chart: ChartRequest::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from the user config file if it
    /// exists, else use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/impoll/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("impoll").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_count == 0 {
            return Err(ConfigError::Invalid("recent_count must be at least 1".into()));
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_ms must be at least 1".into(),
            ));
        }
        if self.database.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database path is empty".into()));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn recent_limit(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.recent_count).unwrap_or(NonZeroUsize::MIN)
    }

    /// View options matching this configuration
    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            chart: self.chart,
            recent_count: self.recent_limit(),
            variable_label: self.variable_label.clone(),
        }
    }
}
