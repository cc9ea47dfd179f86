//! Resolved file locations

use directories::BaseDirs;
use std::fs;
use std::path::PathBuf;

use crate::types::{Result, TrackError};

const DATA_DIR_NAME: &str = ".eggtrack";
const DB_FILE_NAME: &str = "database.db";

/// Where the database and logs live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Config {
    /// Default layout under `~/.eggtrack`, with an optional database override
    pub fn resolve(db_override: Option<PathBuf>) -> Result<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| TrackError::Config("Cannot determine home directory".into()))?;
        let config = Self::with_data_dir(base_dirs.home_dir().join(DATA_DIR_NAME), db_override);
        fs::create_dir_all(&config.data_dir)?;
        Ok(config)
    }

    pub fn with_data_dir(data_dir: PathBuf, db_override: Option<PathBuf>) -> Self {
        let db_path = db_override.unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
        let log_dir = data_dir.join("logs");
        Self {
            data_dir,
            db_path,
            log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = Config::with_data_dir(PathBuf::from("/tmp/eggs"), None);
        assert_eq!(config.db_path, PathBuf::from("/tmp/eggs/database.db"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/eggs/logs"));
    }

    #[test]
    fn test_db_override_keeps_logs_in_data_dir() {
        let config = Config::with_data_dir(
            PathBuf::from("/tmp/eggs"),
            Some(PathBuf::from("/srv/coop/database.db")),
        );
        assert_eq!(config.db_path, PathBuf::from("/srv/coop/database.db"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/eggs/logs"));
    }
}
