// src/constants.rs

/// The name of the application directory (under the system config and data dirs).
pub const APP_DIR_NAME: &str = "recall";

/// The name of the configuration file (in ~/.config/recall/).
pub const CONFIG_FILENAME: &str = "config.toml";

/// The name of the SQLite database file used when the config does not override it.
pub const DATABASE_FILENAME: &str = "recall.db";

/// The name of the file remembering the last authenticated email (in ~/.config/recall/).
pub const SESSION_CACHE_FILENAME: &str = "session.cache.bin";

/// Overrides the configuration directory.
pub const ENV_CONFIG_DIR: &str = "RECALL_CONFIG_DIR";

/// Overrides `database_path` from the configuration file.
pub const ENV_DATABASE: &str = "RECALL_DATABASE";

/// Address the HTTP API binds to when the config does not override it.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Number of log entries shown when no limit is given.
pub const DEFAULT_LOG_LIMIT: usize = 10;

/// Hard ceiling for a single logs query.
pub const MAX_LOG_LIMIT: usize = 500;
