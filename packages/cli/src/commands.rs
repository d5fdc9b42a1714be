// ABOUTME: Settings command logic behind the emspay binary
// ABOUTME: Loads, masks, validates and persists EMS settings against a store

use std::collections::BTreeMap;
use std::path::Path;

use emspay_settings::{emspay, SettingsError, SubmissionOutcome, ValidationError};
use emspay_storage::{SettingsStorage, StorageError};
use serde::Serialize;
use thiserror::Error;

use crate::output::mask_secret;
use crate::submission::{read_submission, SubmissionError};

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{key} was not saved: {}", join_messages(.errors))]
    Rejected {
        key: String,
        errors: Vec<ValidationError>,
    },
    #[error("{} setting(s) failed validation", .0.errors.len())]
    InvalidSubmission(SubmissionOutcome),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(StorageError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl From<StorageError> for CommandError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Settings(settings) => CommandError::Settings(settings),
            other => CommandError::Storage(other),
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Current settings as presented by `show`
#[derive(Debug, Serialize)]
pub struct ShowOutput {
    pub integration: String,
    pub option: String,
    pub updated_at: Option<String>,
    /// True when the environment points at production
    pub live: bool,
    /// Values keyed by field; secrets masked unless revealed
    pub values: BTreeMap<String, String>,
}

pub async fn show_settings(
    storage: &SettingsStorage,
    reveal: bool,
) -> Result<ShowOutput, CommandError> {
    let schema = emspay::schema();
    let instance = storage.load_instance(schema).await?;
    let updated_at = storage.updated_at(&schema.option_key()).await?;

    let mut values = BTreeMap::new();
    for field in schema.fields() {
        let value = instance.get_value(&field.key)?;
        let shown = if field.secret && !reveal {
            mask_secret(value)
        } else {
            value.to_string()
        };
        values.insert(field.key.clone(), shown);
    }

    Ok(ShowOutput {
        integration: schema.id().to_string(),
        option: schema.option_key(),
        updated_at,
        live: instance.typed().environment.is_live(),
        values,
    })
}

pub async fn get_setting(storage: &SettingsStorage, key: &str) -> Result<String, CommandError> {
    let instance = storage.load_instance(emspay::schema()).await?;
    Ok(instance.get_value(key)?.to_string())
}

/// Validate and persist one value; every validation message is carried in the error
pub async fn set_setting(
    storage: &SettingsStorage,
    key: &str,
    value: &str,
) -> Result<String, CommandError> {
    match storage.update_value(emspay::schema(), key, value).await {
        Ok(accepted) => Ok(accepted),
        Err(StorageError::Settings(SettingsError::Invalid(errors))) => Err(CommandError::Rejected {
            key: key.to_string(),
            errors,
        }),
        Err(e) => Err(e.into()),
    }
}

/// Apply a submission file. Submitted values are stored either way; any
/// validation error turns the result into `InvalidSubmission`.
pub async fn save_settings_file(
    storage: &SettingsStorage,
    file: &Path,
) -> Result<SubmissionOutcome, CommandError> {
    let submitted = read_submission(file)?;
    let outcome = storage.save_submission(emspay::schema(), &submitted).await?;

    if outcome.is_valid() {
        Ok(outcome)
    } else {
        Err(CommandError::InvalidSubmission(outcome))
    }
}

pub async fn reset_settings(storage: &SettingsStorage) -> Result<(), CommandError> {
    storage.reset(emspay::schema()).await?;
    Ok(())
}
