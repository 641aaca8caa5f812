use crate::model::RowsPerPage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read from `~/.datatable-tui/config.json`
///
/// Only seeds the initial table state; interaction state is never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data file opened when none is given on the command line
    pub data_path: Option<String>,
    /// Initial page size; must be one of 10, 25, 50 or 100
    pub rows_per_page: usize,
    /// Log level filter (error, warn, info, debug, trace, off)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            rows_per_page: RowsPerPage::default().value(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".datatable-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load() -> Result<Config> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Initial page size, or the default when the configured one is not allowed
    pub fn initial_rows_per_page(&self) -> RowsPerPage {
        RowsPerPage::from_value(self.rows_per_page).unwrap_or_else(|| {
            log::warn!(
                "rows_per_page {} is not one of 10, 25, 50, 100; using 10",
                self.rows_per_page
            );
            RowsPerPage::default()
        })
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or_else(|_| {
            eprintln!("Unknown log level '{}', using info", self.log_level);
            log::LevelFilter::Info
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_path": "people.csv"}"#).unwrap();
        assert_eq!(config.data_path.as_deref(), Some("people.csv"));
        assert_eq!(config.rows_per_page, 10);
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_initial_rows_per_page() {
        let mut config = Config {
            rows_per_page: 50,
            ..Config::default()
        };
        assert_eq!(config.initial_rows_per_page(), RowsPerPage::Fifty);

        config.rows_per_page = 7;
        assert_eq!(config.initial_rows_per_page(), RowsPerPage::Ten);
    }

    #[test]
    fn test_log_level_parsing() {
        let config = Config {
            log_level: "debug".to_string(),
            ..Config::default()
        };
        assert_eq!(config.log_level(), log::LevelFilter::Debug);

        let config = Config {
            log_level: "chatty".to_string(),
            ..Config::default()
        };
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rows_per_page": 25, "log_level": "warn"}}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.rows_per_page, 25);
        assert_eq!(config.log_level(), log::LevelFilter::Warn);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }
}
