// ABOUTME: Admin form submissions read from disk
// ABOUTME: Parses a flat JSON object of field key to submitted value

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Read(PathBuf, std::io::Error),
    #[error("Invalid JSON in submission: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Submission must be a JSON object of field names to values")]
    NotAnObject,
    #[error("Value for {0} must be a string, number or boolean")]
    UnsupportedValue(String),
}

/// Parse a submission; numbers and booleans are taken as their text form
pub fn parse_submission(json: &str) -> Result<HashMap<String, String>, SubmissionError> {
    let Value::Object(object) = serde_json::from_str::<Value>(json)? else {
        return Err(SubmissionError::NotAnObject);
    };

    object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => Ok((key, text)),
            Value::Number(number) => Ok((key, number.to_string())),
            Value::Bool(flag) => Ok((key, flag.to_string())),
            _ => Err(SubmissionError::UnsupportedValue(key)),
        })
        .collect()
}

pub fn read_submission(path: &Path) -> Result<HashMap<String, String>, SubmissionError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| SubmissionError::Read(path.to_path_buf(), e))?;
    parse_submission(&contents)
}
