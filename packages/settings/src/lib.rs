// ABOUTME: Declarative settings schema and validation for the EMS e-Commerce Gateway
// ABOUTME: Field declarations, settings instances, sanitation and admin form descriptors

pub mod emspay;
pub mod form;
pub mod instance;
pub mod schema;
pub mod types;
pub mod validation;

pub use emspay::{
    define_fields, CheckoutOption, EmspaySettings, Environment, PayMode, UnknownChoice, EMSPAY_SCHEMA,
};
pub use form::{render_form, Control, FormControl};
pub use instance::{SettingsInstance, SubmissionOutcome};
pub use schema::{FieldEntry, SchemaError, SettingsError, SettingsSchema, SettingsSchemaBuilder};
pub use types::*;
pub use validation::{
    sanitize_text_field, validate_required_field, Validated, ValidationError, Validator,
};
