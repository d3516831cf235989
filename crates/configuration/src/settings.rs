use chrono::NaiveDate;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetSettings,
    pub dashboard: DashboardSettings,
    pub logging: LoggingSettings,
}

/// Parameters for the synthetic listing generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// The RNG seed. The same seed always reproduces the same listings.
    pub seed: u64,
    /// The date of the first listing; the rest follow on consecutive days.
    pub start_date: NaiveDate,
}

/// Parameters for the aggregate engine and the terminal renderer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub title: String,
    pub caption: String,
    /// Prefix used for every currency amount (e.g. "RM 1,250,000").
    pub currency_symbol: String,
    /// Number of equal-width bins in the price distribution.
    pub histogram_bins: usize,
    /// Width in characters of the longest bar in the terminal charts.
    pub bar_width: usize,
}

/// Parameters for the `tracing` subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Fallback filter directive when `RUST_LOG` is not set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "Real Estate Analytics Dashboard".to_string(),
            caption: "Demo dataset: 20 simulated property listings".to_string(),
            currency_symbol: "RM".to_string(),
            histogram_bins: 8,
            bar_width: 40,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "estate-dashboard.log".to_string(),
        }
    }
}
