// src/state.rs

use crate::{
    core::{
        config::{self, Config},
        paths,
    },
    storage::Database,
};
use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

/// Everything a command handler needs: the loaded configuration and a database
/// that is only opened once a handler asks for it.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub config_dir: PathBuf,
    db: Option<Database>,
}

impl AppContext {
    /// Loads the configuration from the recall config directory.
    pub fn load() -> Result<Self> {
        let config_dir = paths::get_config_dir()?;
        let config = config::load_config_from(&config_dir)
            .with_context(|| format!(t!("error.config_load"), path = config_dir.display()))?;
        Ok(Self::new(config, config_dir))
    }

    pub fn new(config: Config, config_dir: PathBuf) -> Self {
        Self {
            config,
            config_dir,
            db: None,
        }
    }

    /// A context around an already open database.
    pub fn with_database(config: Config, config_dir: PathBuf, db: Database) -> Self {
        Self {
            config,
            config_dir,
            db: Some(db),
        }
    }

    fn open_database(&self) -> Result<Database> {
        let path = self.config.resolve_database_path()?;
        Database::open(&path)
            .with_context(|| format!(t!("error.database_open"), path = path.display()))
    }

    /// The database, opened and migrated on first use.
    pub fn db(&mut self) -> Result<&mut Database> {
        let db = match self.db.take() {
            Some(db) => db,
            None => self.open_database()?,
        };
        Ok(self.db.insert(db))
    }

    /// Moves the database out, for owners that outlive the context (the HTTP server).
    pub fn take_database(&mut self) -> Result<Database> {
        self.db()?;
        self.db
            .take()
            .ok_or_else(|| anyhow!(t!("error.database_unavailable")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_opens_lazily_at_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("data").join("cards.db");
        let config = Config {
            database_path: Some(db_path.display().to_string()),
            ..Config::default()
        };

        let mut ctx = AppContext::new(config, dir.path().to_path_buf());
        assert!(!db_path.exists());
        ctx.db().unwrap();
        assert!(db_path.exists());

        let db = ctx.take_database().unwrap();
        assert!(db.connection().is_autocommit());
    }
}
