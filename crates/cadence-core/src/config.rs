//! Settings for the Cadence front ends
//!
//! ## Configuration Resolution
//!
//! Settings are loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/cadence/config.toml)
//! 2. Embedded defaults (compiled into binary)
//!
//! Analytic thresholds are fixed constants and not configurable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/cadence.toml");

/// Resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Default transactions file
    pub transactions_path: Option<PathBuf>,
    /// Default categories file
    pub categories_path: Option<PathBuf>,
    pub pattern_months: u32,
    pub trend_months: u32,
    pub forecast_months: u32,
    pub top_categories: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transactions_path: None,
            categories_path: None,
            pattern_months: 6,
            trend_months: 6,
            forecast_months: 3,
            top_categories: 5,
        }
    }
}

impl Settings {
    /// Load settings, preferring `path`, then the data-dir override, then defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    debug!("Using settings override at {}", default_path.display());
                    fs::read_to_string(&default_path)
                        .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
                }
                None => DEFAULT_CONFIG.to_string(),
            },
        };

        parse_settings(&content)
    }
}

/// Default settings override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("cadence").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawSettings {
    data: Option<RawData>,
    defaults: Option<RawDefaults>,
}

#[derive(Debug, Deserialize)]
struct RawData {
    transactions: Option<PathBuf>,
    categories: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawDefaults {
    pattern_months: Option<u32>,
    trend_months: Option<u32>,
    forecast_months: Option<u32>,
    top_categories: Option<usize>,
}

/// Parse settings from TOML content
fn parse_settings(content: &str) -> Result<Settings> {
    let raw: RawSettings = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut settings = Settings::default();

    if let Some(data) = raw.data {
        settings.transactions_path = data.transactions;
        settings.categories_path = data.categories;
    }

    if let Some(defaults) = raw.defaults {
        if let Some(months) = defaults.pattern_months {
            settings.pattern_months = months;
        }
        if let Some(months) = defaults.trend_months {
            settings.trend_months = months;
        }
        if let Some(months) = defaults.forecast_months {
            settings.forecast_months = months;
        }
        if let Some(top) = defaults.top_categories {
            settings.top_categories = top;
        }
    }

    for (name, value) in [
        ("pattern_months", settings.pattern_months),
        ("trend_months", settings.trend_months),
        ("forecast_months", settings.forecast_months),
    ] {
        if value == 0 {
            return Err(Error::Config(format!("{} must be positive", name)));
        }
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let settings = parse_settings(DEFAULT_CONFIG).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings = parse_settings(
            r#"
            [data]
            transactions = "ledger.json"

            [defaults]
            trend_months = 12
            "#,
        )
        .unwrap();
        assert_eq!(settings.transactions_path, Some(PathBuf::from("ledger.json")));
        assert_eq!(settings.trend_months, 12);
        assert_eq!(settings.pattern_months, 6);
    }

    #[test]
    fn test_zero_months_rejected() {
        let err = parse_settings("[defaults]\nforecast_months = 0\n").unwrap_err();
        assert!(err.to_string().contains("forecast_months"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadence.toml");
        fs::write(&path, "[defaults]\ntop_categories = 3\n").unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.top_categories, 3);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Settings::load(Some(Path::new("/nonexistent/cadence.toml")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
