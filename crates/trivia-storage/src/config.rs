//! Storage configuration.
//!
//! Settings are read once at startup (see [`StorageConfig::from_env`]) and
//! handed to [`Database::open`](crate::Database::open); nothing is global.

use std::fmt;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{Result, StorageError};

/// Database name used when none is configured.
pub const DEFAULT_DATABASE_NAME: &str = "trivia";

/// Special database name selecting an in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Environment variables recognised by [`StorageConfig::from_env`].
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";
pub const ENV_DATABASE_PORT: &str = "DATABASE_PORT";
pub const ENV_DATABASE_OWNER: &str = "DATABASE_OWNER";
pub const ENV_DATABASE_PASSWORD: &str = "DATABASE_PASSWORD";
pub const ENV_DATA_DIR: &str = "TRIVIA_DATA_DIR";

/// Connection settings for the question store.
///
/// SQLite uses `database_name` (and `data_dir`) to locate the database file.
/// `port`, `owner` and `password` are carried for deployments that front the
/// file with a server, and are never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    pub database_name: String,
    pub port: Option<u16>,
    pub owner: Option<String>,
    pub password: Option<String>,
    /// Directory holding the database file (None = platform data dir).
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Config for a named database in the default location.
    pub fn new(database_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            ..Self::default()
        }
    }

    /// Config for an in-memory database.
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty(ENV_DATABASE_PORT) {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
                StorageError::Config(format!("{} is not a valid port: {}", ENV_DATABASE_PORT, raw))
            })?),
            None => None,
        };

        Ok(Self {
            database_name: non_empty(ENV_DATABASE_NAME)
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            port,
            owner: non_empty(ENV_DATABASE_OWNER),
            password: non_empty(ENV_DATABASE_PASSWORD),
            data_dir: non_empty(ENV_DATA_DIR).map(PathBuf::from),
        })
    }

    /// Sets the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Whether this config selects an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_name == IN_MEMORY
    }

    /// Path of the database file.
    pub fn db_path(&self) -> Result<PathBuf> {
        if self.database_name.trim().is_empty() {
            return Err(StorageError::Config("database name is empty".into()));
        }

        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };

        Ok(dir.join(format!("{}.db", self.database_name)))
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("database_name", &self.database_name)
            .field("port", &self.port)
            .field("owner", &self.owner)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

/// Get the default data directory.
pub fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "trivia", "trivia")
        .ok_or_else(|| StorageError::Config("Could not determine app data directory".into()))?;

    Ok(proj_dirs.data_dir().to_path_buf())
}
