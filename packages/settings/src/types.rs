// ABOUTME: Type definitions for settings fields
// ABOUTME: Field metadata, choice options and the kinds of form control they map to

use serde::{Deserialize, Serialize};

/// Kind of value a field holds, which also decides the form control used for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line free text input
    Text,
    /// Single choice out of a fixed list of options
    Select,
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Select => "select",
        }
    }
}

/// One `(value, label)` pair of a single-choice field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Static description of one configurable setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub key: String,
    pub title: String,
    pub kind: FieldKind,
    pub description: Option<String>,
    pub desc_tip: bool,
    pub class: Option<String>,
    /// Only populated for `FieldKind::Select`, in display order
    pub allowed_values: Vec<FieldOption>,
    pub default_value: String,
    pub required: bool,
    /// Masked by display surfaces, never by validation or storage
    pub secret: bool,
}

impl FieldDefinition {
    /// Free text field with an empty default
    pub fn text(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            kind: FieldKind::Text,
            description: None,
            desc_tip: false,
            class: None,
            allowed_values: Vec::new(),
            default_value: String::new(),
            required: false,
            secret: false,
        }
    }

    /// Single-choice field; `options` are `(value, label)` pairs in display order
    pub fn select<K, V, L>(key: K, title: impl Into<String>, options: Vec<(V, L)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        L: Into<String>,
    {
        let allowed_values: Vec<FieldOption> = options
            .into_iter()
            .map(|(value, label)| FieldOption::new(value, label))
            .collect();
        let default_value = allowed_values
            .first()
            .map(|option| option.value.clone())
            .unwrap_or_default();

        Self {
            key: key.into(),
            title: title.into(),
            kind: FieldKind::Select,
            description: None,
            desc_tip: false,
            class: None,
            allowed_values,
            default_value,
            required: false,
            secret: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_desc_tip(mut self, desc_tip: bool) -> Self {
        self.desc_tip = desc_tip;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn is_choice(&self) -> bool {
        self.kind == FieldKind::Select
    }

    /// Display label for a stored value, if it is one of the declared options
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.allowed_values
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }
}
