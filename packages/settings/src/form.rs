// ABOUTME: Form descriptors for the admin settings page
// ABOUTME: One serializable control per schema field, in declared order

use serde::Serialize;

use crate::instance::SettingsInstance;
use crate::types::{FieldDefinition, FieldKind, FieldOption};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Control {
    /// Single-line text input
    Text,
    /// Selection control, options in declared order
    Select { options: Vec<FieldOption> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormControl {
    pub key: String,
    pub title: String,
    #[serde(flatten)]
    pub control: Control,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub desc_tip: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub default: String,
    pub value: String,
}

impl FormControl {
    pub fn from_field(field: &FieldDefinition, value: &str) -> Self {
        let control = match field.kind {
            FieldKind::Text => Control::Text,
            FieldKind::Select => Control::Select {
                options: field.allowed_values.clone(),
            },
        };

        Self {
            key: field.key.clone(),
            title: field.title.clone(),
            control,
            description: field.description.clone(),
            desc_tip: field.desc_tip,
            class: field.class.clone(),
            default: field.default_value.clone(),
            value: value.to_string(),
        }
    }
}

/// Build the settings form for an instance
pub fn render_form(instance: &SettingsInstance<'_>) -> Vec<FormControl> {
    instance
        .schema()
        .fields()
        .map(|field| {
            let value = instance.get_value(&field.key).unwrap_or(&field.default_value);
            FormControl::from_field(field, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emspay;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_render_form_controls_in_order() {
        let instance = SettingsInstance::with_defaults(emspay::schema());
        let form = render_form(&instance);

        let kinds: Vec<(&str, bool)> = form
            .iter()
            .map(|c| (c.key.as_str(), matches!(c.control, Control::Select { .. })))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("storename", false),
                ("sharedsecret", false),
                ("checkoutoption", true),
                ("mode", true),
                ("environment", true),
            ]
        );
    }

    #[test]
    fn test_render_form_carries_current_value() {
        let stored = HashMap::from([("mode".to_string(), "payplus".to_string())]);
        let instance = SettingsInstance::from_stored(emspay::schema(), &stored);

        let form = render_form(&instance);
        let mode = form.iter().find(|c| c.key == "mode").unwrap();
        assert_eq!(mode.value, "payplus");
        assert_eq!(mode.default, "payonly");
    }

    #[test]
    fn test_select_serializes_with_options() {
        let instance = SettingsInstance::with_defaults(emspay::schema());
        let form = render_form(&instance);
        let environment = form.iter().find(|c| c.key == "environment").unwrap();

        let value = serde_json::to_value(environment).unwrap();
        assert_eq!(
            value,
            json!({
                "key": "environment",
                "title": "Environment",
                "type": "select",
                "options": [
                    {"value": "integration", "label": "Integration"},
                    {"value": "production", "label": "Production"}
                ],
                "description": "This setting specifies whether you will process live transactions, or whether you will process simulated transactions.",
                "desc_tip": true,
                "class": "wc-enhanced-select",
                "default": "integration",
                "value": "integration"
            })
        );
    }

    #[test]
    fn test_text_serializes_without_class() {
        let instance = SettingsInstance::with_defaults(emspay::schema());
        let form = render_form(&instance);

        let value = serde_json::to_value(&form[0]).unwrap();
        assert_eq!(value["type"], "text");
        assert!(value.get("class").is_none());
        assert!(value.get("options").is_none());
    }
}
