//! Database migration management commands.

use clap::{Args, Subcommand};

use smartpark_core::config::AppConfig;
use smartpark_core::error::AppError;
use smartpark_database::connection::DatabasePool;
use smartpark_database::migration::run_migrations;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    match args.command {
        MigrateCommand::Run => {
            let database = DatabasePool::connect(&config.database).await?;
            println!("Running database migrations...");
            let result = run_migrations(database.pool()).await;
            database.close().await;
            result?;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
