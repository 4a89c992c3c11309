// src/core/config.rs

use crate::{
    constants::{CONFIG_FILENAME, DEFAULT_BIND_ADDRESS, DEFAULT_LOG_LIMIT, ENV_DATABASE},
    core::{
        paths::{self, PathError},
        validation::ValidationRules,
    },
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    #[error("Failed to parse '{path}': {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// The deserialized structure of `config.toml`. Missing keys take their defaults.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Path template for the SQLite database (`~` and `$VARS` are expanded).
    pub database_path: Option<String>,
    pub validation: ValidationRules,
    pub logs: LogsConfig,
    pub server: ServerConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LogsConfig {
    pub default_limit: usize,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LOG_LIMIT,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl Config {
    /// Resolves the database location: `RECALL_DATABASE`, then `database_path`,
    /// then the platform data directory.
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        let from_env = std::env::var(ENV_DATABASE).ok();
        self.database_path_with_override(from_env.as_deref())
    }

    fn database_path_with_override(&self, env_value: Option<&str>) -> Result<PathBuf, ConfigError> {
        let template = env_value
            .filter(|v| !v.trim().is_empty())
            .or(self.database_path.as_deref());
        match template {
            Some(t) => Ok(paths::expand_path_template(t)?),
            None => Ok(paths::default_database_path()?),
        }
    }
}

/// Loads `config.toml` from `config_dir`, writing a default file on first use.
pub fn load_config_from(config_dir: &Path) -> Result<Config, ConfigError> {
    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        log::debug!("No config at '{}', writing defaults", config_path.display());
        let default_config = Config::default();
        paths::ensure_dir(config_dir)?;
        fs::write(&config_path, toml::to_string_pretty(&default_config)?)?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(&config_path)?;
    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: config_path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(dir.path()).unwrap();

        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILENAME).exists());

        // A second load reads the file that was just written.
        let reloaded = load_config_from(dir.path()).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[validation]\nmin_question_len = 2\n",
        )
        .unwrap();

        let config = load_config_from(dir.path()).unwrap();
        assert_eq!(config.validation.min_question_len, 2);
        assert_eq!(config.validation.min_answer_len, 2);
        assert_eq!(config.logs.default_limit, DEFAULT_LOG_LIMIT);
        assert_eq!(config.server.bind, DEFAULT_BIND_ADDRESS);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "database_path = [").unwrap();

        let err = load_config_from(dir.path()).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILENAME));
    }

    #[test]
    fn test_database_path_precedence() {
        let config = Config {
            database_path: Some("/srv/recall/main.db".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.database_path_with_override(None).unwrap(),
            PathBuf::from("/srv/recall/main.db")
        );
        assert_eq!(
            config.database_path_with_override(Some("/tmp/other.db")).unwrap(),
            PathBuf::from("/tmp/other.db")
        );
        assert_eq!(
            config.database_path_with_override(Some("  ")).unwrap(),
            PathBuf::from("/srv/recall/main.db")
        );
    }
}
