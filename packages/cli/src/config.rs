use std::env;
use std::path::PathBuf;

use emspay_config::{
    DEFAULT_DATABASE_FILE, DEFAULT_DATA_DIR, DEFAULT_LOG_FILTER, EMSPAY_DATABASE_URL, EMSPAY_LOG,
    RUST_LOG,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory; set {0} explicitly")]
    NoHomeDirectory(&'static str),
    #[error("Invalid database URL: {0}. Must start with 'sqlite:'")]
    InvalidDatabaseUrl(String),
    #[error("Failed to create data directory {}: {}", .0.display(), .1)]
    DataDirectory(PathBuf, std::io::Error),
}

#[derive(Debug)]
pub struct Config {
    pub database_url: String,
    pub log_filter: String,
    /// Directory to create before connecting, set when the default database is used
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let (database_url, data_dir) = match env::var(EMSPAY_DATABASE_URL) {
            Ok(url) if !url.trim().is_empty() => {
                let url = url.trim().to_string();
                if !url.starts_with("sqlite:") {
                    return Err(ConfigError::InvalidDatabaseUrl(url));
                }
                (url, None)
            }
            _ => {
                let data_dir = default_data_dir()?;
                let path = data_dir.join(DEFAULT_DATABASE_FILE);
                (format!("sqlite://{}?mode=rwc", path.display()), Some(data_dir))
            }
        };

        let log_filter = env::var(EMSPAY_LOG)
            .or_else(|_| env::var(RUST_LOG))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            database_url,
            log_filter,
            data_dir,
        })
    }

    /// Create the default data directory if this config points into it
    pub fn ensure_data_dir(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.data_dir {
            std::fs::create_dir_all(dir)
                .map_err(|e| ConfigError::DataDirectory(dir.clone(), e))?;
        }
        Ok(())
    }
}

fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DATA_DIR))
        .ok_or(ConfigError::NoHomeDirectory(EMSPAY_DATABASE_URL))
}
