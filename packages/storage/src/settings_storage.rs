// ABOUTME: Storage operations for integration settings
// ABOUTME: Load and upsert of the per-integration settings option

use std::collections::{BTreeMap, HashMap};

use emspay_settings::{SettingsInstance, SettingsSchema, SubmissionOutcome};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::{StorageError, StorageResult};

pub struct SettingsStorage {
    pool: SqlitePool,
}

impl SettingsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url` and make sure the option table exists
    pub async fn connect(database_url: &str) -> StorageResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        let storage = Self::new(pool);
        storage.init().await?;
        Ok(storage)
    }

    /// Create the option table if it is missing
    pub async fn init(&self) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS options (
                option_name TEXT PRIMARY KEY,
                option_value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now', 'utc'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Stored key/value pairs of an option, empty if the option was never saved
    pub async fn load_raw(&self, option_name: &str) -> StorageResult<HashMap<String, String>> {
        let stored: Option<String> =
            sqlx::query_scalar("SELECT option_value FROM options WHERE option_name = ?")
                .bind(option_name)
                .fetch_optional(&self.pool)
                .await?;

        let Some(stored) = stored else {
            debug!(option = option_name, "Option not stored yet");
            return Ok(HashMap::new());
        };

        let Value::Object(object) = serde_json::from_str::<Value>(&stored)? else {
            return Err(StorageError::InvalidFormat(option_name.to_string()));
        };

        let mut values = HashMap::with_capacity(object.len());
        for (key, value) in object {
            match value {
                Value::String(text) => {
                    values.insert(key, text);
                }
                other => warn!(
                    option = option_name,
                    key = %key,
                    value = %other,
                    "Skipping non-string stored setting"
                ),
            }
        }

        Ok(values)
    }

    /// Insert or replace an option
    pub async fn save_raw(
        &self,
        option_name: &str,
        values: &BTreeMap<String, String>,
    ) -> StorageResult<()> {
        let serialized = serde_json::to_string(values)?;

        sqlx::query(
            r#"
            INSERT INTO options (option_name, option_value)
            VALUES (?, ?)
            ON CONFLICT(option_name) DO UPDATE SET
                option_value = excluded.option_value,
                updated_at = datetime('now', 'utc')
            "#,
        )
        .bind(option_name)
        .bind(&serialized)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove an option; returns whether anything was deleted
    pub async fn delete(&self, option_name: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM options WHERE option_name = ?")
            .bind(option_name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Last write time of an option as stored by SQLite (UTC)
    pub async fn updated_at(&self, option_name: &str) -> StorageResult<Option<String>> {
        let updated_at = sqlx::query_scalar("SELECT updated_at FROM options WHERE option_name = ?")
            .bind(option_name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated_at)
    }

    /// Load the settings of `schema`, default-filling anything not stored
    pub async fn load_instance<'s>(
        &self,
        schema: &'s SettingsSchema,
    ) -> StorageResult<SettingsInstance<'s>> {
        let stored = self.load_raw(&schema.option_key()).await?;
        Ok(SettingsInstance::from_stored(schema, &stored))
    }

    pub async fn save_instance(&self, instance: &SettingsInstance<'_>) -> StorageResult<()> {
        let option_name = instance.schema().option_key();
        self.save_raw(&option_name, &instance.to_stored()).await?;

        info!(option = %option_name, "Saved settings");
        Ok(())
    }

    /// Validate and persist a single value
    pub async fn update_value(
        &self,
        schema: &SettingsSchema,
        key: &str,
        raw_value: &str,
    ) -> StorageResult<String> {
        let mut instance = self.load_instance(schema).await?;
        let accepted = instance.set_value(key, raw_value)?;
        self.save_instance(&instance).await?;

        Ok(accepted)
    }

    /// Apply an admin form submission and persist every submitted field
    pub async fn save_submission(
        &self,
        schema: &SettingsSchema,
        submitted: &HashMap<String, String>,
    ) -> StorageResult<SubmissionOutcome> {
        let mut instance = self.load_instance(schema).await?;
        let outcome = instance.apply_submission(submitted);

        if outcome.has_changes() {
            self.save_instance(&instance).await?;
        }

        Ok(outcome)
    }

    /// Drop the stored option so every field reads as its default again
    pub async fn reset(&self, schema: &SettingsSchema) -> StorageResult<()> {
        let option_name = schema.option_key();
        if self.delete(&option_name).await? {
            info!(option = %option_name, "Reset settings to defaults");
        }

        Ok(())
    }
}
