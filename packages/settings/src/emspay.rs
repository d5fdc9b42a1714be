// ABOUTME: Field declarations for the EMS e-Commerce Gateway integration
// ABOUTME: Process-wide schema plus typed enums for the checkout, pay mode and environment choices

use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::instance::SettingsInstance;
use crate::schema::SettingsSchema;
use crate::types::FieldDefinition;

pub const INTEGRATION_ID: &str = "emspay";
pub const METHOD_TITLE: &str = "EMS e-Commerce Gateway";
pub const METHOD_DESCRIPTION: &str =
    "Allow customers to conveniently checkout directly with EMS e-Commerce Gateway.";

pub const STORENAME: &str = "storename";
pub const SHAREDSECRET: &str = "sharedsecret";
pub const CHECKOUTOPTION: &str = "checkoutoption";
pub const MODE: &str = "mode";
pub const ENVIRONMENT: &str = "environment";

const ENHANCED_SELECT: &str = "wc-enhanced-select";

/// Global schema for the EMS integration, built once on first use
pub static EMSPAY_SCHEMA: LazyLock<SettingsSchema> = LazyLock::new(|| {
    SettingsSchema::builder(INTEGRATION_ID)
        .method_title(METHOD_TITLE)
        .method_description(METHOD_DESCRIPTION)
        .fields(define_fields())
        .build()
        .unwrap_or_else(|e| panic!("FATAL: EMS settings declaration is inconsistent: {}", e))
});

pub fn schema() -> &'static SettingsSchema {
    &EMSPAY_SCHEMA
}

/// The EMS settings fields, always the same five in the same order
pub fn define_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::text(STORENAME, "Store Name")
            .with_description("This is the ID of the store provided by EMS.")
            .with_desc_tip(true)
            .required(),
        FieldDefinition::text(SHAREDSECRET, "Shared Secret")
            .with_description("This is the shared secret provided to you by EMS.")
            .with_desc_tip(true)
            .required()
            .secret(),
        FieldDefinition::select(
            CHECKOUTOPTION,
            "Checkout option",
            CheckoutOption::ALL
                .iter()
                .map(|o| (o.as_str(), o.as_str()))
                .collect(),
        )
        .with_class(ENHANCED_SELECT)
        .with_description("This field allows you to set the checkout option.")
        .with_desc_tip(true)
        .with_default(CheckoutOption::default().as_str()),
        FieldDefinition::select(
            MODE,
            "Pay mode",
            PayMode::ALL.iter().map(|m| (m.as_str(), m.as_str())).collect(),
        )
        .with_class(ENHANCED_SELECT)
        .with_description("This field allows you to chosen mode for the transaction.")
        .with_desc_tip(true)
        .with_default(PayMode::default().as_str()),
        FieldDefinition::select(
            ENVIRONMENT,
            "Environment",
            Environment::ALL
                .iter()
                .map(|e| (e.as_str(), e.label()))
                .collect(),
        )
        .with_class(ENHANCED_SELECT)
        .with_description(
            "This setting specifies whether you will process live transactions, \
             or whether you will process simulated transactions.",
        )
        .with_desc_tip(true)
        .with_default(Environment::default().as_str()),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {field} value: {value}")]
pub struct UnknownChoice {
    pub field: &'static str,
    pub value: String,
}

/// How the hosted payment pages are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutOption {
    /// Payment process split over multiple pages
    #[default]
    Classic,
    /// Payment method choice and the next step on a single page
    CombinedPage,
}

impl CheckoutOption {
    pub const ALL: [CheckoutOption; 2] = [CheckoutOption::Classic, CheckoutOption::CombinedPage];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutOption::Classic => "classic",
            CheckoutOption::CombinedPage => "combinedpage",
        }
    }
}

impl FromStr for CheckoutOption {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(CheckoutOption::Classic),
            "combinedpage" => Ok(CheckoutOption::CombinedPage),
            _ => Err(UnknownChoice {
                field: CHECKOUTOPTION,
                value: s.to_string(),
            }),
        }
    }
}

/// How much information the hosted pages collect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMode {
    /// Minimum set of payment details only
    #[default]
    PayOnly,
    /// Payment details plus billing information
    PayPlus,
    /// Payment, billing and shipping information
    FullPay,
}

impl PayMode {
    pub const ALL: [PayMode; 3] = [PayMode::PayOnly, PayMode::PayPlus, PayMode::FullPay];

    pub fn as_str(&self) -> &'static str {
        match self {
            PayMode::PayOnly => "payonly",
            PayMode::PayPlus => "payplus",
            PayMode::FullPay => "fullpay",
        }
    }
}

impl FromStr for PayMode {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payonly" => Ok(PayMode::PayOnly),
            "payplus" => Ok(PayMode::PayPlus),
            "fullpay" => Ok(PayMode::FullPay),
            _ => Err(UnknownChoice {
                field: MODE,
                value: s.to_string(),
            }),
        }
    }
}

/// Whether transactions are simulated or live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Integration,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Integration, Environment::Production];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Integration => "integration",
            Environment::Production => "production",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Environment::Integration => "Integration",
            Environment::Production => "Production",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integration" => Ok(Environment::Integration),
            "production" => Ok(Environment::Production),
            _ => Err(UnknownChoice {
                field: ENVIRONMENT,
                value: s.to_string(),
            }),
        }
    }
}

/// Typed snapshot of the EMS settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmspaySettings {
    pub store_name: String,
    pub shared_secret: String,
    pub checkout_option: CheckoutOption,
    pub mode: PayMode,
    pub environment: Environment,
}

impl EmspaySettings {
    /// Read the typed view out of an instance of the EMS schema.
    ///
    /// Choice values that are not recognised fall back to the field default.
    pub fn from_instance(instance: &SettingsInstance<'_>) -> Self {
        let text = |key: &str| instance.get_value(key).unwrap_or_default().to_string();

        Self {
            store_name: text(STORENAME),
            shared_secret: text(SHAREDSECRET),
            checkout_option: parse_or_default(&text(CHECKOUTOPTION)),
            mode: parse_or_default(&text(MODE)),
            environment: parse_or_default(&text(ENVIRONMENT)),
        }
    }
}

impl SettingsInstance<'_> {
    /// Typed view of an EMS settings instance
    pub fn typed(&self) -> EmspaySettings {
        EmspaySettings::from_instance(self)
    }
}

fn parse_or_default<T>(value: &str) -> T
where
    T: FromStr<Err = UnknownChoice> + Default,
{
    value.parse().unwrap_or_else(|e: UnknownChoice| {
        tracing::warn!(field = e.field, value = %e.value, "Unrecognised choice, using default");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn test_define_fields_order_and_keys() {
        let keys: Vec<String> = define_fields().into_iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            vec!["storename", "sharedsecret", "checkoutoption", "mode", "environment"]
        );
    }

    #[test]
    fn test_define_fields_is_deterministic() {
        assert_eq!(define_fields(), define_fields());
    }

    #[rstest]
    #[case(CHECKOUTOPTION, vec!["classic", "combinedpage"])]
    #[case(MODE, vec!["payonly", "payplus", "fullpay"])]
    #[case(ENVIRONMENT, vec!["integration", "production"])]
    fn test_choice_order(#[case] key: &str, #[case] expected: Vec<&str>) {
        let field = schema().field(key).unwrap();
        let values: Vec<&str> = field
            .allowed_values
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, expected);
        assert_eq!(field.class.as_deref(), Some("wc-enhanced-select"));
    }

    #[rstest]
    #[case(STORENAME, "")]
    #[case(SHAREDSECRET, "")]
    #[case(CHECKOUTOPTION, "classic")]
    #[case(MODE, "payonly")]
    #[case(ENVIRONMENT, "integration")]
    fn test_defaults(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(schema().default_value(key).unwrap(), expected);
    }

    #[test]
    fn test_only_credentials_are_required() {
        let required: Vec<&str> = schema()
            .fields()
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(required, vec![STORENAME, SHAREDSECRET]);
        assert!(schema().entry(ENVIRONMENT).unwrap().validators.is_empty());
    }

    #[test]
    fn test_schema_metadata() {
        assert_eq!(schema().id(), "emspay");
        assert_eq!(schema().method_title(), "EMS e-Commerce Gateway");
        assert_eq!(schema().option_key(), "woocommerce_emspay_settings");
        assert!(schema().field(SHAREDSECRET).unwrap().secret);
    }

    #[test]
    fn test_environment_labels() {
        let field = schema().field(ENVIRONMENT).unwrap();
        assert_eq!(field.label_for("production"), Some("Production"));
        assert!(Environment::Production.is_live());
        assert!(!Environment::Integration.is_live());
    }

    #[test]
    fn test_enum_serde_matches_wire_literals() {
        for option in CheckoutOption::ALL {
            let json = serde_json::to_string(&option).unwrap();
            assert_eq!(json, format!("\"{}\"", option.as_str()));
        }
        for mode in PayMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
        for environment in Environment::ALL {
            let json = serde_json::to_string(&environment).unwrap();
            assert_eq!(json, format!("\"{}\"", environment.as_str()));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "express".parse::<CheckoutOption>().unwrap_err();
        assert_eq!(err.field, CHECKOUTOPTION);
        assert_eq!(err.to_string(), "Unknown checkoutoption value: express");
        assert!("PAYONLY".parse::<PayMode>().is_err());
    }

    #[test]
    fn test_typed_view_from_instance() {
        let stored = HashMap::from([
            (STORENAME.to_string(), "1234567".to_string()),
            (SHAREDSECRET.to_string(), "s3cret".to_string()),
            (MODE.to_string(), "fullpay".to_string()),
            (ENVIRONMENT.to_string(), "production".to_string()),
        ]);
        let instance = SettingsInstance::from_stored(schema(), &stored);

        let settings = EmspaySettings::from_instance(&instance);
        assert_eq!(
            settings,
            EmspaySettings {
                store_name: "1234567".to_string(),
                shared_secret: "s3cret".to_string(),
                checkout_option: CheckoutOption::Classic,
                mode: PayMode::FullPay,
                environment: Environment::Production,
            }
        );
    }

    #[test]
    fn test_typed_view_falls_back_on_unknown_choice() {
        let stored = HashMap::from([(CHECKOUTOPTION.to_string(), "express".to_string())]);
        let instance = SettingsInstance::from_stored(schema(), &stored);

        assert_eq!(instance.get_value(CHECKOUTOPTION).unwrap(), "express");
        let settings = EmspaySettings::from_instance(&instance);
        assert_eq!(settings.checkout_option, CheckoutOption::Classic);
    }
}
