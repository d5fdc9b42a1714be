// ABOUTME: Settings command handlers for the emspay CLI
// ABOUTME: Terminal rendering of field listings, values, submissions and reset

use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use emspay_cli::commands::{self, CommandError};
use emspay_cli::output::{display_value, options_summary};
use emspay_settings::{emspay, render_form, SettingsInstance, SubmissionOutcome};
use emspay_storage::SettingsStorage;
use inquire::Confirm;
use std::path::Path;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn list_fields(json: bool) -> CommandResult {
    let schema = emspay::schema();
    let instance = SettingsInstance::with_defaults(schema);

    if json {
        println!("{}", serde_json::to_string_pretty(&render_form(&instance))?);
        return Ok(());
    }

    println!("{}", schema.method_title().blue().bold());
    println!("{}", schema.method_description().dimmed());
    println!();

    let mut table = new_table();
    table.set_header(vec!["Key", "Title", "Type", "Options", "Default", "Required"]);

    for field in schema.fields() {
        table.add_row(vec![
            field.key.clone(),
            field.title.clone(),
            field.kind.as_str().to_string(),
            options_summary(field),
            field.default_value.clone(),
            if field.required { "yes" } else { "no" }.to_string(),
        ]);
    }

    println!("{}", table);
    Ok(())
}

pub async fn show(storage: &SettingsStorage, json: bool, reveal: bool) -> CommandResult {
    let schema = emspay::schema();
    let output = commands::show_settings(storage, reveal).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("{} settings", schema.method_title()).blue().bold()
    );
    println!();

    let mut table = new_table();
    table.set_header(vec!["Setting", "Key", "Value"]);

    for field in schema.fields() {
        let value = output.values.get(&field.key).map(String::as_str).unwrap_or_default();
        let shown = if value.is_empty() {
            "(not set)".dimmed().to_string()
        } else {
            // Already masked when it needs to be
            display_value(field, value, true)
        };
        table.add_row(vec![field.title.clone(), field.key.clone(), shown]);
    }

    println!("{}", table);
    if output.live {
        println!("{}", "Live: payments go to the production environment".red().bold());
    }
    match output.updated_at {
        Some(at) => println!("Last saved: {} UTC", at.cyan()),
        None => println!("{}", "Never saved, showing defaults".yellow()),
    }

    Ok(())
}

pub async fn get(storage: &SettingsStorage, key: &str) -> CommandResult {
    println!("{}", commands::get_setting(storage, key).await?);
    Ok(())
}

pub async fn set(storage: &SettingsStorage, key: &str, value: &str) -> CommandResult {
    match commands::set_setting(storage, key, value).await {
        Ok(accepted) => {
            let field = emspay::schema().field(key)?;
            println!(
                "{} {} = {}",
                "✓".green(),
                field.title.bold(),
                display_value(field, &accepted, false)
            );
            Ok(())
        }
        Err(CommandError::Rejected { key, errors }) => {
            for error in &errors {
                eprintln!("{}", error.message.red());
            }
            Err(format!("{} was not saved", key).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_outcome(outcome: &SubmissionOutcome) {
    for key in &outcome.accepted {
        println!("{} {}", "✓".green(), key);
    }
    for key in &outcome.ignored {
        println!("{} {} (not a setting, ignored)", "!".yellow(), key);
    }
    for error in &outcome.errors {
        eprintln!("{} {}", "✗".red(), error.message.red());
    }
}

pub async fn save(storage: &SettingsStorage, file: &Path) -> CommandResult {
    match commands::save_settings_file(storage, file).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            println!("{}", "Your settings have been saved.".green());
            Ok(())
        }
        Err(CommandError::InvalidSubmission(outcome)) => {
            print_outcome(&outcome);
            Err(format!(
                "Settings saved with {} validation error(s)",
                outcome.errors.len()
            )
            .into())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn reset(storage: &SettingsStorage, yes: bool) -> CommandResult {
    if !yes {
        let confirmed = Confirm::new("Reset every EMS setting to its default?")
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("{}", "Reset cancelled".yellow());
            return Ok(());
        }
    }

    commands::reset_settings(storage).await?;
    println!("{}", "Settings reset to defaults".green());
    Ok(())
}
