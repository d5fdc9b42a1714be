// ABOUTME: Live settings values backed by a schema
// ABOUTME: Default-filled loading, validated updates and collect-all form submissions

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::schema::{SettingsError, SettingsSchema};
use crate::validation::{sanitize_text_field, Validated, ValidationError};

/// Current values for every field of one schema
#[derive(Debug, Clone)]
pub struct SettingsInstance<'s> {
    schema: &'s SettingsSchema,
    values: HashMap<String, String>,
}

impl PartialEq for SettingsInstance<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.values == other.values
    }
}

impl Eq for SettingsInstance<'_> {}

/// What happened to an admin form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionOutcome {
    /// Sanitized value applied for every submitted schema field, valid or not
    pub sanitized: BTreeMap<String, String>,
    /// Keys whose new value passed validation
    pub accepted: Vec<String>,
    pub errors: Vec<ValidationError>,
    /// Submitted keys that are not part of the schema
    pub ignored: Vec<String>,
}

impl SubmissionOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the submission changed anything that needs persisting
    pub fn has_changes(&self) -> bool {
        !self.sanitized.is_empty()
    }
}

impl<'s> SettingsInstance<'s> {
    /// Instance holding only default values
    pub fn with_defaults(schema: &'s SettingsSchema) -> Self {
        let values = schema
            .fields()
            .map(|field| (field.key.clone(), field.default_value.clone()))
            .collect();

        Self { schema, values }
    }

    /// Merge persisted values over the schema defaults.
    ///
    /// Stored values are sanitized but never rejected; keys the schema does not
    /// declare are dropped.
    pub fn from_stored(schema: &'s SettingsSchema, stored: &HashMap<String, String>) -> Self {
        let mut instance = Self::with_defaults(schema);

        for (key, value) in stored {
            match instance.values.get_mut(key) {
                Some(slot) => *slot = sanitize_text_field(value),
                None => debug!(key = %key, schema = schema.id(), "Dropping stale stored setting"),
            }
        }

        instance
    }

    pub fn schema(&self) -> &'s SettingsSchema {
        self.schema
    }

    pub fn get_value(&self, key: &str) -> Result<&str, SettingsError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| SettingsError::UnknownField(key.to_string()))
    }

    pub fn validate(&self, key: &str, raw_value: &str) -> Result<Validated, SettingsError> {
        self.schema.validate(key, raw_value)
    }

    /// Strict single-value update: validate and store, leaving the instance
    /// untouched on failure
    pub fn set_value(&mut self, key: &str, raw_value: &str) -> Result<String, SettingsError> {
        let Validated { value, errors } = self.schema.validate(key, raw_value)?;

        if !errors.is_empty() {
            return Err(SettingsError::Invalid(errors));
        }

        self.values.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// Apply an admin form submission.
    ///
    /// Every submitted field is sanitized, validated and applied. Validation
    /// errors are reported but do not stop the sanitized value from being
    /// stored, so a cleared credential reads as empty afterwards. Fields
    /// missing from the submission are left as they are.
    pub fn apply_submission(&mut self, submitted: &HashMap<String, String>) -> SubmissionOutcome {
        let schema = self.schema;
        let mut outcome = SubmissionOutcome::default();

        for key in schema.keys() {
            let Some(raw_value) = submitted.get(key) else {
                continue;
            };

            let validated = match schema.validate(key, raw_value) {
                Ok(validated) => validated,
                Err(_) => continue,
            };

            if validated.is_valid() {
                outcome.accepted.push(key.to_string());
            } else {
                outcome.errors.extend(validated.errors);
            }

            outcome
                .sanitized
                .insert(key.to_string(), validated.value.clone());
            self.values.insert(key.to_string(), validated.value);
        }

        let mut ignored: Vec<String> = submitted
            .keys()
            .filter(|key| !schema.contains(key))
            .cloned()
            .collect();
        ignored.sort();
        for key in &ignored {
            warn!(key = %key, schema = schema.id(), "Ignoring submitted key not in schema");
        }
        outcome.ignored = ignored;

        info!(
            schema = schema.id(),
            accepted = outcome.accepted.len(),
            errors = outcome.errors.len(),
            "Processed settings submission"
        );

        outcome
    }

    /// Put every field back to its default
    pub fn reset(&mut self) {
        for field in self.schema.fields() {
            self.values
                .insert(field.key.clone(), field.default_value.clone());
        }
    }

    /// `(key, value)` pairs in schema order
    pub fn values(&self) -> Vec<(&str, &str)> {
        self.schema
            .keys()
            .filter_map(|key| self.values.get(key).map(|value| (key, value.as_str())))
            .collect()
    }

    /// Representation handed to persistence
    pub fn to_stored(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}
