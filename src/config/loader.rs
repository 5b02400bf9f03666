//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading planner
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{PlannerError, PlannerResult};
use crate::models::Holiday;

use super::types::{HolidaysConfig, PlannerConfig, PlannerSettings};

/// Loads and provides access to planner configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── planner.yaml        # Planner settings
/// └── holidays/
///     └── 2026.yaml       # Public holidays, one file per year
/// ```
///
/// The `holidays` directory is optional; without it, only weekends are
/// non-business days.
///
/// # Example
///
/// ```no_run
/// use inspection_planner::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Loaded configuration: {}", loader.settings().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PlannerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `planner.yaml` is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    pub fn load<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("planner.yaml");
        let settings = Self::load_yaml::<PlannerSettings>(&settings_path)?;

        let holidays = Self::load_holidays(&path.join("holidays"))?;

        Ok(Self {
            config: PlannerConfig::new(settings, holidays),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PlannerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PlannerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PlannerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all holiday files from the holidays directory, if present.
    fn load_holidays(holidays_dir: &Path) -> PlannerResult<Vec<Holiday>> {
        if !holidays_dir.exists() {
            return Ok(Vec::new());
        }

        let holidays_dir_str = holidays_dir.display().to_string();
        let entries = fs::read_dir(holidays_dir).map_err(|_| PlannerError::ConfigNotFound {
            path: holidays_dir_str.clone(),
        })?;

        let mut holidays = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| PlannerError::ConfigNotFound {
                path: holidays_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<HolidaysConfig>(&path)?;
                holidays.extend(file.holidays);
            }
        }

        Ok(holidays)
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PlannerConfig {
        self.config
    }

    /// Returns the planner settings.
    pub fn settings(&self) -> &PlannerSettings {
        self.config.settings()
    }

    /// Returns the configured holidays, sorted by date.
    pub fn holidays(&self) -> &[Holiday] {
        self.config.holidays()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "inspection-planner-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().name, "default");
        assert_eq!(loader.settings().controller_role, "controller");
        assert_eq!(loader.settings().seed, None);
    }

    #[test]
    fn test_holidays_loaded_and_sorted() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let holidays = loader.holidays();

        assert!(!holidays.is_empty());
        assert!(holidays.windows(2).all(|w| w[0].date < w[1].date));
        assert!(
            holidays
                .iter()
                .any(|h| h.date == NaiveDate::from_ymd_opt(2026, 12, 25).unwrap())
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(PlannerError::ConfigNotFound { path }) => {
                assert!(path.contains("planner.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_holidays_directory_means_no_holidays() {
        let dir = scratch_dir("no-holidays");
        fs::write(dir.join("planner.yaml"), "name: bare\nseed: 7\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert!(loader.holidays().is_empty());
        assert_eq!(loader.settings().seed, Some(7));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_holiday_file_returns_parse_error() {
        let dir = scratch_dir("bad-holidays");
        fs::write(dir.join("planner.yaml"), "name: bad\n").unwrap();
        fs::create_dir_all(dir.join("holidays")).unwrap();
        fs::write(
            dir.join("holidays").join("2026.yaml"),
            "holidays:\n  - date: not-a-date\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(PlannerError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("2026.yaml"));
            }
            other => panic!("Expected ConfigParseError error, got {other:?}"),
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_non_yaml_files_are_ignored() {
        let dir = scratch_dir("readme");
        fs::write(dir.join("planner.yaml"), "name: notes\n").unwrap();
        fs::create_dir_all(dir.join("holidays")).unwrap();
        fs::write(dir.join("holidays").join("README.txt"), "not yaml: [").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert!(loader.holidays().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }
}
