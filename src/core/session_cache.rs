// src/core/session_cache.rs

//! Remembers the last email that authenticated successfully, so prompts can
//! offer it as the default. Stored as bincode next to `config.toml`.

use crate::constants::SESSION_CACHE_FILENAME;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionCacheError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode from binary format: {0}")]
    BincodeDecode(#[from] bincode::error::DecodeError),
    #[error("Failed to encode to binary format: {0}")]
    BincodeEncode(#[from] bincode::error::EncodeError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RememberedLogin {
    pub email: String,
    /// Unix timestamp of the last successful login.
    pub last_login: i64,
}

pub fn read_remembered_login(config_dir: &Path) -> Result<Option<RememberedLogin>, SessionCacheError> {
    let path = config_dir.join(SESSION_CACHE_FILENAME);
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(&path)?;
    let (login, _): (RememberedLogin, usize) =
        bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
    Ok(Some(login))
}

pub fn write_remembered_login(config_dir: &Path, email: &str) -> Result<(), SessionCacheError> {
    let login = RememberedLogin {
        email: email.to_string(),
        last_login: chrono::Utc::now().timestamp(),
    };
    let bytes = bincode::serde::encode_to_vec(&login, bincode::config::standard())?;
    fs::write(config_dir.join(SESSION_CACHE_FILENAME), bytes)?;
    Ok(())
}

/// Best-effort lookup; a corrupt cache is ignored.
pub fn last_email(config_dir: &Path) -> Option<String> {
    match read_remembered_login(config_dir) {
        Ok(login) => login.map(|l| l.email),
        Err(e) => {
            log::warn!("Ignoring unreadable session cache: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cache_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_remembered_login(dir.path()).unwrap(), None);
        assert_eq!(last_email(dir.path()), None);
    }

    #[test]
    fn test_written_login_is_read_back() {
        let dir = tempfile::tempdir().unwrap();
        write_remembered_login(dir.path(), "ada@example.com").unwrap();

        let login = read_remembered_login(dir.path()).unwrap().unwrap();
        assert_eq!(login.email, "ada@example.com");
        assert!(login.last_login > 0);
    }

    #[test]
    fn test_corrupt_cache_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SESSION_CACHE_FILENAME), [0xff, 0xff, 0xff]).unwrap();
        assert_eq!(last_email(dir.path()), None);
    }
}
