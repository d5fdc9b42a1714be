// ABOUTME: Display helpers shared by the CLI commands
// ABOUTME: Secret masking and human-readable rendering of field values

use emspay_settings::FieldDefinition;

const MASK: &str = "********";

/// Hide a secret value, keeping only whether it is set
pub fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        MASK.to_string()
    }
}

/// Value as shown in tables: masked secrets, choice labels next to their literal
pub fn display_value(field: &FieldDefinition, value: &str, reveal: bool) -> String {
    if field.secret && !reveal {
        return mask_secret(value);
    }

    match field.label_for(value) {
        Some(label) if label != value => format!("{} ({})", value, label),
        _ => value.to_string(),
    }
}

/// Comma-separated option values of a choice field, or "-" for free text
pub fn options_summary(field: &FieldDefinition) -> String {
    if field.allowed_values.is_empty() {
        return "-".to_string();
    }

    field
        .allowed_values
        .iter()
        .map(|option| option.value.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
