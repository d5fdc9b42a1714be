use crate::commands::{
    get_setting, reset_settings, save_settings_file, set_setting, show_settings, CommandError,
};
use emspay_settings::SettingsError;
use emspay_storage::SettingsStorage;
use pretty_assertions::assert_eq;
use std::io::Write;

async fn setup_storage() -> SettingsStorage {
    SettingsStorage::connect("sqlite::memory:").await.unwrap()
}

fn submission_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    file
}

#[tokio::test]
async fn test_show_masks_secret_unless_revealed() {
    let storage = setup_storage().await;
    set_setting(&storage, "sharedsecret", "s3cret").await.unwrap();

    let masked = show_settings(&storage, false).await.unwrap();
    assert_eq!(masked.values["sharedsecret"], "********");

    let revealed = show_settings(&storage, true).await.unwrap();
    assert_eq!(revealed.values["sharedsecret"], "s3cret");
}

#[tokio::test]
async fn test_show_defaults_on_fresh_store() {
    let storage = setup_storage().await;

    let output = show_settings(&storage, false).await.unwrap();

    assert_eq!(output.integration, "emspay");
    assert_eq!(output.option, "woocommerce_emspay_settings");
    assert!(output.updated_at.is_none());
    assert!(!output.live);
    assert_eq!(output.values["sharedsecret"], "");
    assert_eq!(output.values["environment"], "integration");
}

#[tokio::test]
async fn test_show_flags_production_as_live() {
    let storage = setup_storage().await;
    set_setting(&storage, "environment", "production").await.unwrap();

    let output = show_settings(&storage, false).await.unwrap();
    assert!(output.live);
    assert!(output.updated_at.is_some());
}

#[tokio::test]
async fn test_set_rejects_blank_required_value() {
    let storage = setup_storage().await;
    set_setting(&storage, "storename", "10123456789").await.unwrap();

    let err = set_setting(&storage, "storename", "   ").await.unwrap_err();
    match &err {
        CommandError::Rejected { key, errors } => {
            assert_eq!(key, "storename");
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].message, "Error: You must enter Store Name.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "storename was not saved: Error: You must enter Store Name."
    );
    assert_eq!(get_setting(&storage, "storename").await.unwrap(), "10123456789");
}

#[tokio::test]
async fn test_set_and_get_unknown_key() {
    let storage = setup_storage().await;

    let err = set_setting(&storage, "apikey", "x").await.unwrap_err();
    assert!(matches!(
        err,
        CommandError::Settings(SettingsError::UnknownField(key)) if key == "apikey"
    ));
    assert!(matches!(
        get_setting(&storage, "apikey").await,
        Err(CommandError::Settings(SettingsError::UnknownField(_)))
    ));
}

#[tokio::test]
async fn test_save_lists_every_error() {
    let storage = setup_storage().await;
    let file = submission_file(r#"{"storename": "", "sharedsecret": "  ", "mode": "payplus"}"#);

    let err = save_settings_file(&storage, file.path()).await.unwrap_err();
    let CommandError::InvalidSubmission(outcome) = err else {
        panic!("expected an invalid submission");
    };

    let messages: Vec<&str> = outcome.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Error: You must enter Store Name.",
            "Error: You must enter Shared Secret.",
        ]
    );
    assert_eq!(outcome.accepted, vec!["mode".to_string()]);
    assert_eq!(get_setting(&storage, "mode").await.unwrap(), "payplus");
}

#[tokio::test]
async fn test_save_valid_submission() {
    let storage = setup_storage().await;
    let file = submission_file(
        r#"{"storename": " 10123456789 ", "sharedsecret": "s3cret", "environment": "production", "extra": 1}"#,
    );

    let outcome = save_settings_file(&storage, file.path()).await.unwrap();

    assert!(outcome.is_valid());
    assert_eq!(outcome.ignored, vec!["extra".to_string()]);
    assert_eq!(get_setting(&storage, "storename").await.unwrap(), "10123456789");
}

#[tokio::test]
async fn test_save_unreadable_file() {
    let storage = setup_storage().await;
    let dir = tempfile::tempdir().unwrap();

    let result = save_settings_file(&storage, &dir.path().join("missing.json")).await;
    assert!(matches!(result, Err(CommandError::Submission(_))));
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let storage = setup_storage().await;
    set_setting(&storage, "mode", "fullpay").await.unwrap();

    reset_settings(&storage).await.unwrap();

    assert_eq!(get_setting(&storage, "mode").await.unwrap(), "payonly");
}
