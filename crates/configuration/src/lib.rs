use crate::error::ConfigError;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DashboardSettings, DatasetSettings, LoggingSettings};

/// Prefix for environment overrides, e.g. `ESTATE__DATASET__SEED=7`.
const ENV_PREFIX: &str = "ESTATE";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file (an explicit
/// `path` must exist, otherwise an optional `config.toml` in the working
/// directory), then `ESTATE__*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file_source = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file_source)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

impl Config {
    /// Rejects settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.histogram_bins must be at least 1".to_string(),
            ));
        }
        if self.dashboard.bar_width == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.bar_width must be at least 1".to_string(),
            ));
        }
        if self.dashboard.currency_symbol.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "dashboard.currency_symbol must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command-line overrides that take precedence over every other source.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ConfigOverrides {
    /// Path to a TOML configuration file.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub config: Option<PathBuf>,

    /// Seed for the synthetic dataset.
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub seed: Option<u64>,

    /// Date of the first listing (format: YYYY-MM-DD).
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub start_date: Option<chrono::NaiveDate>,
}

impl ConfigOverrides {
    /// Loads the configuration from `self.config` and applies the remaining overrides.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let mut config = load_config(self.config.as_deref())?;
        self.apply(&mut config);
        Ok(config)
    }

    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.dataset.seed = seed;
        }
        if let Some(start_date) = self.start_date {
            config.dataset.start_date = start_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create temp config");
        file.write_all(contents.as_bytes()).expect("write temp config");
        file
    }

    #[test]
    fn defaults_match_the_demo_dashboard() {
        let config = Config::default();
        assert_eq!(config.dataset.seed, 42);
        assert_eq!(
            config.dataset.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(config.dashboard.histogram_bins, 8);
        assert_eq!(config.dashboard.currency_symbol, "RM");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [dataset]
            seed = 7
            start_date = "2024-06-01"

            [dashboard]
            histogram_bins = 5
            "#,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.dataset.seed, 7);
        assert_eq!(
            config.dataset.start_date,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert_eq!(config.dashboard.histogram_bins, 5);
        // Untouched keys keep their defaults.
        assert_eq!(config.dashboard.currency_symbol, "RM");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn rejects_zero_bins() {
        let file = write_config("[dashboard]\nhistogram_bins = 0\n");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
    }

    #[test]
    fn overrides_win_over_file() {
        let file = write_config("[dataset]\nseed = 7\n");
        let overrides = ConfigOverrides {
            config: Some(file.path().to_path_buf()),
            seed: Some(99),
            start_date: None,
        };
        let config = overrides.load().unwrap();
        assert_eq!(config.dataset.seed, 99);
    }
}
