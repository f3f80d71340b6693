//! Configuration management for askbase
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.askbase/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{AskError, Result};
use crate::history::HistoryStore;
use crate::knowledge::{Corpus, MatchEngine};

/// Complete configuration for askbase
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// File system paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub history_file: String,
    /// Corpus file (.toml or .json); the built-in corpus when unset
    #[serde(default)]
    pub corpus_file: Option<String>,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            history_file: "~/.askbase/chat_history.json".to_string(),
            corpus_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AskError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| AskError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".askbase").join("config.toml");
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.paths.history_file.trim().is_empty() {
            return Err(AskError::ConfigError(
                "history_file must not be empty".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(AskError::ConfigError(format!(
                    "Invalid log level: {}",
                    self.logging.level
                )))
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| AskError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AskError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AskError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Resolved history file path
    pub fn history_path(&self) -> PathBuf {
        Self::expand_path(&self.paths.history_file)
    }

    /// Resolved corpus file path, if one is configured
    pub fn corpus_path(&self) -> Option<PathBuf> {
        self.paths.corpus_file.as_deref().map(Self::expand_path)
    }

    /// Build the match engine from the configured corpus
    pub fn match_engine(&self) -> Result<MatchEngine> {
        let corpus = match self.corpus_path() {
            Some(path) => Corpus::from_file(&path)?,
            None => Corpus::builtin(),
        };
        Ok(MatchEngine::new(corpus))
    }

    /// Build the history store at the configured path
    pub fn history_store(&self) -> HistoryStore {
        HistoryStore::new(self.history_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.paths.history_file, "~/.askbase/chat_history.json");
        assert!(config.paths.corpus_file.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_log_level() {
        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_history_path() {
        let mut config = Config::default();
        config.paths.history_file = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("config.toml");

        let mut config = Config::default();
        config.paths.history_file = "/tmp/history.json".to_string();
        config.logging.level = "debug".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded.history_path(), PathBuf::from("/tmp/history.json"));
        assert_eq!(loaded.logging.level, "debug");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.paths.history_file, "~/.askbase/chat_history.json");
    }

    #[test]
    fn test_missing_corpus_file_errors() {
        let mut config = Config::default();
        config.paths.corpus_file = Some("/nonexistent/corpus.toml".to_string());
        assert!(matches!(config.match_engine(), Err(AskError::InvalidCorpus(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path("~/.askbase");
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let path = "/absolute/path";
        assert_eq!(Config::expand_path(path).to_string_lossy(), path);
    }
}
