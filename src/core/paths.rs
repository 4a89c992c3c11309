// src/core/paths.rs

use crate::constants::{APP_DIR_NAME, DATABASE_FILENAME, ENV_CONFIG_DIR};
use lazy_static::lazy_static;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref RECALL_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not find system data directory.")]
    DataDirNotFound,
    #[error("Could not create directory at '{path}': {source}")]
    DirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to expand path template '{template}': {reason}")]
    Expansion { template: String, reason: String },
}

/// Creates `path` and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<(), PathError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| PathError::DirCreation {
            path: path.display().to_string(),
            source: e,
        })?;
    }
    Ok(())
}

/// Returns the path to the recall configuration directory (`~/.config/recall`),
/// or the directory named by `RECALL_CONFIG_DIR`. Creates it if it doesn't exist.
///
/// This function is memoized: the first call computes and caches the path,
/// subsequent calls return the cached value.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    let mut cached_path_guard = RECALL_CONFIG_DIR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = &*cached_path_guard {
        return Ok(path.clone());
    }

    let config_path = match std::env::var_os(ENV_CONFIG_DIR) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::config_dir()
            .ok_or(PathError::ConfigDirNotFound)?
            .join(APP_DIR_NAME),
    };

    ensure_dir(&config_path)?;
    *cached_path_guard = Some(config_path.clone());
    Ok(config_path)
}

/// `~/.local/share/recall/recall.db` (or the platform equivalent).
pub fn default_database_path() -> Result<PathBuf, PathError> {
    let data_dir = dirs::data_dir().ok_or(PathError::DataDirNotFound)?;
    Ok(data_dir.join(APP_DIR_NAME).join(DATABASE_FILENAME))
}

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a path template.
pub fn expand_path_template(template: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(template).map_err(|e| PathError::Expansion {
        template: template.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_path_is_unchanged() {
        let path = expand_path_template("/tmp/recall/test.db").unwrap();
        assert_eq!(path, PathBuf::from("/tmp/recall/test.db"));
    }

    #[test]
    fn test_expand_home_directory() {
        let path = expand_path_template("~/recall.db").unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("recall.db"));
    }

    #[test]
    fn test_expand_unknown_variable_fails() {
        let result = expand_path_template("$RECALL_SURELY_UNDEFINED_VARIABLE/x.db");
        assert!(matches!(result, Err(PathError::Expansion { .. })));
    }

    #[test]
    fn test_ensure_dir_creates_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
