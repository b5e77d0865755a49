//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod slot;
pub mod user;

use clap::{Parser, Subcommand};

use smartpark_core::config::{AppConfig, StoreProvider};
use smartpark_core::error::AppError;
use smartpark_database::StoreManager;

use crate::output::OutputFormat;

/// SmartPark parking lot management
#[derive(Debug, Parser)]
#[command(name = "smartpark", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file; defaults to config/default.toml plus
    /// the SMARTPARK_ENV overlay
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the SmartPark server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User account management
    User(user::UserArgs),
    /// Parking slot provisioning
    Slot(slot::SlotArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(self.config.as_deref())?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Slot(args) => slot::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: load configuration from an explicit file or the environment layers
pub fn load_config(path: Option<&str>) -> Result<AppConfig, AppError> {
    match path {
        Some(path) => AppConfig::from_file(path),
        None => {
            let env =
                std::env::var("SMARTPARK_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Helper: open the persistent store for an administrative command.
///
/// The memory provider keeps nothing after the process exits, so
/// administrative writes against it are refused.
pub async fn open_stores(config: &AppConfig) -> Result<StoreManager, AppError> {
    if config.database.provider == StoreProvider::Memory {
        return Err(AppError::configuration(
            "This command needs the postgres store provider",
        ));
    }
    StoreManager::new(&config.database).await
}
