//! Connection settings for the SQLite store.

use std::path::Path;
use std::time::Duration;

use log::warn;

pub const DATABASE_URL_ENV: &str = "STREAKMAP_DATABASE_URL";
pub const POOL_SIZE_ENV: &str = "STREAKMAP_DB_POOL_SIZE";

const DB_FILE_NAME: &str = "streakmap.db";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub db_path: String,
    pub pool_size: u32,
    pub connection_timeout: Duration,
}

impl StorageConfig {
    /// Settings for a database file inside `data_dir`, with default pool tuning.
    pub fn new(data_dir: &str) -> Self {
        StorageConfig {
            db_path: Path::new(data_dir)
                .join(DB_FILE_NAME)
                .to_string_lossy()
                .into_owned(),
            pool_size: DEFAULT_POOL_SIZE,
            connection_timeout: Duration::from_secs(DEFAULT_CONNECTION_TIMEOUT_SECS),
        }
    }

    /// Like [`StorageConfig::new`], but `STREAKMAP_DATABASE_URL` and
    /// `STREAKMAP_DB_POOL_SIZE` take precedence when set.
    pub fn from_env(data_dir: &str) -> Self {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    fn from_lookup<F>(data_dir: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(data_dir);
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.db_path = url;
        }
        if let Some(raw) = lookup(POOL_SIZE_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => config.pool_size = size,
                _ => warn!(
                    "Ignoring invalid {}={:?}; using pool size {}",
                    POOL_SIZE_ENV, raw, config.pool_size
                ),
            }
        }
        config
    }
}
