use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

mod cli;

use emspay_cli::config::Config;
use emspay_cli::logging;
use emspay_storage::SettingsStorage;

#[derive(Parser)]
#[command(name = "emspay")]
#[command(about = "EMS e-Commerce Gateway settings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the settings fields as the admin form declares them
    Fields {
        /// Print the form descriptor as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current settings
    Show {
        /// Print the values as JSON
        #[arg(long)]
        json: bool,
        /// Show secret values instead of masking them
        #[arg(long)]
        reveal: bool,
    },
    /// Print the current value of one setting
    Get {
        /// Field key, e.g. storename
        key: String,
    },
    /// Validate and store one setting
    Set {
        /// Field key, e.g. storename
        key: String,
        /// New value
        value: String,
    },
    /// Apply an admin form submission read from a JSON file
    Save {
        /// JSON object of field keys to submitted values
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Reset every setting to its default
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init(&config.log_filter);

    // Listing fields needs no database
    let storage = match command {
        Commands::Fields { json } => return cli::settings::list_fields(json),
        _ => {
            config.ensure_data_dir()?;
            tracing::debug!(database = %config.database_url, "Opening settings database");
            SettingsStorage::connect(&config.database_url).await?
        }
    };

    match command {
        Commands::Fields { json } => cli::settings::list_fields(json),
        Commands::Show { json, reveal } => cli::settings::show(&storage, json, reveal).await,
        Commands::Get { key } => cli::settings::get(&storage, &key).await,
        Commands::Set { key, value } => cli::settings::set(&storage, &key, &value).await,
        Commands::Save { file } => cli::settings::save(&storage, &file).await,
        Commands::Reset { yes } => cli::settings::reset(&storage, yes).await,
    }
}
