// ABOUTME: Persistence for EMS gateway settings
// ABOUTME: Host-style option table in SQLite holding one JSON object per integration

pub mod settings_storage;

use thiserror::Error;

pub use settings_storage::SettingsStorage;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Option {0} does not hold a JSON object")]
    InvalidFormat(String),
    #[error("Settings error: {0}")]
    Settings(#[from] emspay_settings::SettingsError),
}

pub type StorageResult<T> = Result<T, StorageError>;
