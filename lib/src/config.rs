use crate::error::{PeywandError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Database file; falls back to `~/.pw.db`
    #[serde(default)]
    pub db_path: Option<PathBuf>,

    /// Colored table output
    #[serde(default = "default_color")]
    pub color: bool,

    /// Background of alternating rows in `list`
    #[serde(default = "default_row_color")]
    pub row_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            color: default_color(),
            row_color: default_row_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

fn default_row_color() -> String {
    "dark-gray".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PeywandError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the default location (~/.config/peywand/config.yml).
    ///
    /// Falls back to the defaults if the file is missing or unreadable.
    pub fn load() -> Self {
        let config_path = Self::default_path();

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}; using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn default_path() -> PathBuf {
        crate::utils::get_config_dir().join("config.yml")
    }

    /// Resolve the database file: explicit override, `PEYWAND_DB`, config, default
    pub fn resolve_db_path(&self, override_path: Option<&Path>) -> PathBuf {
        if let Some(path) = override_path {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var("PEYWAND_DB") {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        self.db_path
            .clone()
            .unwrap_or_else(crate::utils::get_default_db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn save_to_path(config: &Config, path: &Path) {
        fs::write(path, serde_yaml::to_string(config).unwrap()).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.color);
        assert_eq!(config.row_color, "dark-gray");
        assert_eq!(config.db_path, None);
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        let original = Config {
            db_path: Some(PathBuf::from("/tmp/bookmarks.db")),
            color: false,
            row_color: "light-green".to_string(),
        };

        save_to_path(&original, config_path);
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "invalid: yaml: content:").unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(result, Err(PeywandError::Yaml(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load_from_path(Path::new("/nonexistent/peywand/config.yml"));
        assert!(matches!(result, Err(PeywandError::Config(_))));
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "color: false\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert!(!config.color);
        assert_eq!(config.row_color, default_row_color());
        assert_eq!(config.db_path, None);
    }

    #[test]
    fn test_explicit_db_path_wins() {
        let config = Config {
            db_path: Some(PathBuf::from("/from/config.db")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_db_path(Some(Path::new("/from/flag.db"))),
            PathBuf::from("/from/flag.db")
        );
    }
}
