//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local use.

use std::env;
use std::path::PathBuf;

use crate::db::slots;
use crate::models::Coordinates;

const DEFAULT_DATA_DIR: &str = ".mapty";
const DEFAULT_MAP_ZOOM: u8 = 13;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the slot files
    pub data_dir: PathBuf,
    /// Slot holding the workout history
    pub storage_key: String,
    /// Zoom level for the initial map view and for panning to a workout
    pub map_zoom: u8,
    /// Position reported by the console geolocation provider (None = denied)
    pub home: Option<Coordinates>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: slots::WORKOUTS.to_string(),
            map_zoom: DEFAULT_MAP_ZOOM,
            home: Some(Coordinates::new(51.505, -0.09)),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let map_zoom = match env::var("MAPTY_MAP_ZOOM") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("MAPTY_MAP_ZOOM", raw))?,
            Err(_) => DEFAULT_MAP_ZOOM,
        };

        let home = match (env::var("MAPTY_HOME_LAT"), env::var("MAPTY_HOME_LNG")) {
            (Ok(lat), Ok(lng)) => Some(Coordinates::new(
                parse_degrees("MAPTY_HOME_LAT", lat, 90.0)?,
                parse_degrees("MAPTY_HOME_LNG", lng, 180.0)?,
            )),
            (Err(_), Err(_)) => None,
            (Ok(_), Err(_)) => return Err(ConfigError::Missing("MAPTY_HOME_LNG")),
            (Err(_), Ok(_)) => return Err(ConfigError::Missing("MAPTY_HOME_LAT")),
        };

        Ok(Self {
            data_dir: env::var("MAPTY_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            storage_key: env::var("MAPTY_STORAGE_KEY")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| slots::WORKOUTS.to_string()),
            map_zoom,
            home,
        })
    }
}

fn parse_degrees(name: &'static str, raw: String, limit: f64) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() <= limit => Ok(v),
        _ => Err(ConfigError::Invalid(name, raw)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide, so everything env-related
    // lives in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("MAPTY_HOME_LAT");
        env::remove_var("MAPTY_HOME_LNG");
        env::set_var("MAPTY_DATA_DIR", "/tmp/mapty-test");
        env::set_var("MAPTY_MAP_ZOOM", "15");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/mapty-test"));
        assert_eq!(config.map_zoom, 15);
        assert_eq!(config.home, None);

        env::set_var("MAPTY_HOME_LAT", "51.5");
        env::set_var("MAPTY_HOME_LNG", "-0.12");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.home, Some(Coordinates::new(51.5, -0.12)));

        env::set_var("MAPTY_HOME_LAT", "123");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("MAPTY_HOME_LAT", _))
        ));

        env::remove_var("MAPTY_HOME_LNG");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("MAPTY_HOME_LNG"))
        ));

        env::set_var("MAPTY_MAP_ZOOM", "close");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("MAPTY_MAP_ZOOM", _))
        ));

        for var in [
            "MAPTY_DATA_DIR",
            "MAPTY_MAP_ZOOM",
            "MAPTY_HOME_LAT",
            "MAPTY_HOME_LNG",
        ] {
            env::remove_var(var);
        }
    }
}
