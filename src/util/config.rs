use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::infra::DEFAULT_DELIMITER;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "FlightProfitPlanner";
const APP_NAME: &str = "FlightProfitPlanner";
const CONFIG_FILENAME: &str = "planner.json";

/// Points at a config file that must exist, bypassing the platform config directory.
pub const CONFIG_ENV_VAR: &str = "FLIGHT_PLANNER_CONFIG";

/// Input files and presentation settings for a planning run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub airports_path: PathBuf,
    pub aircraft_path: PathBuf,
    pub flights_path: PathBuf,
    pub delimiter: char,
    pub currency_symbol: String,
    pub log_level: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            airports_path: PathBuf::from("airports.csv"),
            aircraft_path: PathBuf::from("aeroplanes.csv"),
            flights_path: PathBuf::from("valid_flight_data.csv"),
            delimiter: char::from(DEFAULT_DELIMITER),
            currency_symbol: "£".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Delimiter as the single byte the reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|&byte| byte.is_ascii() && !matches!(byte, b'\n' | b'\r' | b'"'))
            .ok_or(ConfigError::InvalidDelimiter(self.delimiter))
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Resolves relative input paths against `dir`. Absolute paths are left alone.
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        for path in [
            &mut self.airports_path,
            &mut self.aircraft_path,
            &mut self.flights_path,
        ] {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.delimiter_byte()?;
        self.level_filter()?;
        Ok(())
    }
}

fn config_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

pub fn load_config_from(path: &Path) -> Result<PlannerConfig, ConfigError> {
    let data = fs::read_to_string(path)?;
    let config: PlannerConfig = serde_json::from_str(&data)?;
    config.validate()?;
    Ok(config)
}

/// Loads the config named by [`CONFIG_ENV_VAR`], else `planner.json` from the
/// platform config directory, else the defaults.
pub fn load_config() -> Result<(PlannerConfig, Option<PathBuf>), ConfigError> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
        return load_config_from(&path).map(|config| (config, Some(path)));
    }

    match config_file() {
        Some(path) if path.exists() => load_config_from(&path).map(|config| (config, Some(path))),
        _ => Ok((PlannerConfig::default(), None)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("delimiter {0:?} must be a single ASCII character other than a quote or newline")]
    InvalidDelimiter(char),
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
