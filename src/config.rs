/// Dashboard configuration, loaded from a TOML file.
///
/// Every field has a default, and a missing config file is not an error —
/// the service runs against `indianapolis_temp.csv` in the working
/// directory with console logging unless told otherwise.

use serde::Deserialize;
use std::path::Path;

use crate::dates::PredictionYears;
use crate::logging::LogLevel;

/// Default dataset path when neither `dataset` nor `dataset_url` is set.
pub const DEFAULT_DATASET: &str = "indianapolis_temp.csv";

/// Where the dataset comes from, after config resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Local CSV path. Takes precedence over `dataset_url`.
    pub dataset: Option<String>,
    /// HTTP(S) source for the CSV, fetched at startup.
    pub dataset_url: Option<String>,
    /// File that receives the invalid-entries log. Console-only when unset.
    pub log_file: Option<String>,
    /// Minimum level: "debug", "info", "warning", or "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Inclusive year range accepted for predictions.
    #[serde(default)]
    pub prediction_years: PredictionYears,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dataset: None,
            dataset_url: None,
            log_file: None,
            log_level: default_log_level(),
            prediction_years: PredictionYears::default(),
        }
    }
}

/// Errors reading or parsing the configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "could not read config file: {}", msg),
            ConfigError::Parse(msg) => write!(f, "could not parse config file: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Loads configuration from `path`. An absent file yields the defaults;
    /// an unreadable or malformed file is an error.
    pub fn load(path: &str) -> Result<Config, ConfigError> {
        if !Path::new(path).exists() {
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolves the dataset source: explicit file, then URL, then the
    /// default local CSV.
    pub fn dataset_source(&self) -> DatasetSource {
        if let Some(path) = &self.dataset {
            DatasetSource::File(path.clone())
        } else if let Some(url) = &self.dataset_url {
            DatasetSource::Url(url.clone())
        } else {
            DatasetSource::File(DEFAULT_DATASET.to_string())
        }
    }

    pub fn min_log_level(&self) -> LogLevel {
        LogLevel::from_name(&self.log_level)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_fields_set() {
        let config = Config::default();
        assert_eq!(config.dataset_source(), DatasetSource::File(DEFAULT_DATASET.to_string()));
        assert_eq!(config.min_log_level(), LogLevel::Info);
        assert_eq!(config.prediction_years, PredictionYears { min: 2021, max: 3000 });
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
            dataset = "data/indy.csv"
            log_file = "invalidentries.log"
            log_level = "debug"

            [prediction_years]
            min = 2021
            max = 2500
        "#;
        let config: Config = toml::from_str(text).expect("config should parse");
        assert_eq!(config.dataset_source(), DatasetSource::File("data/indy.csv".to_string()));
        assert_eq!(config.log_file.as_deref(), Some("invalidentries.log"));
        assert_eq!(config.min_log_level(), LogLevel::Debug);
        assert_eq!(config.prediction_years, PredictionYears { min: 2021, max: 2500 });
    }

    #[test]
    fn test_url_source_used_when_no_local_path() {
        let text = r#"dataset_url = "https://example.com/indy.csv""#;
        let config: Config = toml::from_str(text).expect("config should parse");
        assert_eq!(
            config.dataset_source(),
            DatasetSource::Url("https://example.com/indy.csv".to_string())
        );
    }

    #[test]
    fn test_local_path_takes_precedence_over_url() {
        let text = r#"
            dataset = "local.csv"
            dataset_url = "https://example.com/indy.csv"
        "#;
        let config: Config = toml::from_str(text).expect("config should parse");
        assert_eq!(config.dataset_source(), DatasetSource::File("local.csv".to_string()));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load("does-not-exist.toml").expect("absent file is not an error");
        assert_eq!(config, Config::default());
    }
}
