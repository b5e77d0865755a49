//! Parking slot provisioning commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use smartpark_core::config::AppConfig;
use smartpark_core::error::AppError;
use smartpark_entity::slot::{ParkingSlot, SlotStatus};
use smartpark_service::{RequestContext, SlotService};

use crate::output::{self, OutputFormat};

/// Arguments for slot commands
#[derive(Debug, Args)]
pub struct SlotArgs {
    /// Slot subcommand
    #[command(subcommand)]
    pub command: SlotCommand,
}

/// Slot subcommands
#[derive(Debug, Subcommand)]
pub enum SlotCommand {
    /// Add new available slots
    Create {
        /// Number of slots to add
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },
    /// List slots
    List {
        /// Filter by status: available or occupied
        #[arg(short, long)]
        status: Option<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct SlotRow {
    slot_number: i32,
    status: String,
    created_at: String,
}

impl From<&ParkingSlot> for SlotRow {
    fn from(s: &ParkingSlot) -> Self {
        Self {
            slot_number: s.slot_number,
            status: s.status.to_string(),
            created_at: s.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute slot commands
pub async fn execute(
    args: &SlotArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;
    let service = SlotService::new(Arc::clone(&stores.slots));

    let result = run(&service, &args.command, format).await;
    stores.close().await;
    result
}

async fn run(
    service: &SlotService,
    command: &SlotCommand,
    format: OutputFormat,
) -> Result<(), AppError> {
    match command {
        SlotCommand::Create { count } => {
            let created = service
                .create_many(&RequestContext::system(), *count)
                .await?;
            let rows: Vec<SlotRow> = created.iter().map(SlotRow::from).collect();
            output::print_list(&rows, format);
            output::print_success(&format!("{} slot(s) created", created.len()));
        }
        SlotCommand::List { status } => {
            let status = status
                .as_deref()
                .map(str::parse::<SlotStatus>)
                .transpose()?;
            let slots = service.list(status).await?;
            let rows: Vec<SlotRow> = slots.iter().map(SlotRow::from).collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}
