// ABOUTME: Declarative settings schema with build-time validator resolution
// ABOUTME: Ordered field registry, lookup by key, and per-field validation

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{FieldDefinition, FieldKind};
use crate::validation::{sanitize_text_field, validate_required_field, Validated, Validator};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Unknown setting key: {0}")]
    UnknownField(String),

    #[error("{}", join_messages(.0))]
    Invalid(Vec<crate::validation::ValidationError>),
}

fn join_messages(errors: &[crate::validation::ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Problems with a schema declaration, reported by `SettingsSchemaBuilder::build`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Duplicate field key: {0}")]
    DuplicateKey(String),

    #[error("Choice field {0} declares no options")]
    MissingOptions(String),

    #[error("Text field {0} cannot declare options")]
    UnexpectedOptions(String),

    #[error("Validator registered for undeclared field: {0}")]
    UnknownValidatorTarget(String),
}

/// A field definition together with the validators resolved for it
#[derive(Debug, Clone)]
pub struct FieldEntry {
    pub definition: FieldDefinition,
    /// Run in order; the required check, when present, comes first
    pub validators: Vec<Validator>,
}

/// Immutable, ordered set of settings fields for one integration
#[derive(Debug, Clone)]
pub struct SettingsSchema {
    id: String,
    method_title: String,
    method_description: String,
    entries: Vec<FieldEntry>,
    index: HashMap<String, usize>,
}

impl SettingsSchema {
    pub fn builder(id: impl Into<String>) -> SettingsSchemaBuilder {
        SettingsSchemaBuilder {
            id: id.into(),
            method_title: String::new(),
            method_description: String::new(),
            fields: Vec::new(),
            validators: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn method_title(&self) -> &str {
        &self.method_title
    }

    pub fn method_description(&self) -> &str {
        &self.method_description
    }

    /// Name of the host option the settings of this schema are persisted under
    pub fn option_key(&self) -> String {
        format!("woocommerce_{}_settings", self.id)
    }

    /// Field definitions in declared order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> + '_ {
        self.entries.iter().map(|entry| &entry.definition)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields().map(|field| field.key.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn entry(&self, key: &str) -> Result<&FieldEntry, SettingsError> {
        self.index
            .get(key)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| SettingsError::UnknownField(key.to_string()))
    }

    pub fn field(&self, key: &str) -> Result<&FieldDefinition, SettingsError> {
        self.entry(key).map(|entry| &entry.definition)
    }

    pub fn default_value(&self, key: &str) -> Result<&str, SettingsError> {
        self.field(key).map(|field| field.default_value.as_str())
    }

    /// Sanitize `raw_value` and run every validator of the field on the result.
    ///
    /// Never rejects: the sanitized value is returned alongside any errors.
    pub fn validate(&self, key: &str, raw_value: &str) -> Result<Validated, SettingsError> {
        let entry = self.entry(key)?;
        let value = sanitize_text_field(raw_value);

        let errors = entry
            .validators
            .iter()
            .filter_map(|validator| validator(&entry.definition, &value).err())
            .collect();

        Ok(Validated { value, errors })
    }
}

pub struct SettingsSchemaBuilder {
    id: String,
    method_title: String,
    method_description: String,
    fields: Vec<FieldDefinition>,
    validators: Vec<(String, Validator)>,
}

impl SettingsSchemaBuilder {
    pub fn method_title(mut self, title: impl Into<String>) -> Self {
        self.method_title = title.into();
        self
    }

    pub fn method_description(mut self, description: impl Into<String>) -> Self {
        self.method_description = description.into();
        self
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Register a custom validator; it runs after the required-field check, if any
    pub fn validator(mut self, key: impl Into<String>, validator: Validator) -> Self {
        self.validators.push((key.into(), validator));
        self
    }

    pub fn build(self) -> Result<SettingsSchema, SchemaError> {
        let mut index = HashMap::with_capacity(self.fields.len());
        let mut entries = Vec::with_capacity(self.fields.len());

        for definition in self.fields {
            match definition.kind {
                FieldKind::Select if definition.allowed_values.is_empty() => {
                    return Err(SchemaError::MissingOptions(definition.key));
                }
                FieldKind::Text if !definition.allowed_values.is_empty() => {
                    return Err(SchemaError::UnexpectedOptions(definition.key));
                }
                _ => {}
            }

            if index.insert(definition.key.clone(), entries.len()).is_some() {
                return Err(SchemaError::DuplicateKey(definition.key));
            }

            let validators: Vec<Validator> = if definition.required {
                vec![validate_required_field]
            } else {
                Vec::new()
            };
            entries.push(FieldEntry {
                definition,
                validators,
            });
        }

        for (key, validator) in self.validators {
            let position = *index
                .get(&key)
                .ok_or(SchemaError::UnknownValidatorTarget(key))?;
            entries[position].validators.push(validator);
        }

        Ok(SettingsSchema {
            id: self.id,
            method_title: self.method_title,
            method_description: self.method_description,
            entries,
            index,
        })
    }
}
