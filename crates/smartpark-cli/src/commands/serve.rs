//! Start the SmartPark server.

use clap::Args;

use smartpark_core::config::{AppConfig, StoreProvider};
use smartpark_core::error::AppError;
use smartpark_database::StoreManager;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Serve from the in-memory store instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.database.provider = StoreProvider::Memory;
    }

    println!("Starting SmartPark server...");
    output::print_kv("Host", &config.server.host);
    output::print_kv("Port", &config.server.port.to_string());
    output::print_kv("Store", &config.database.provider.to_string());
    if config.database.provider == StoreProvider::Memory {
        output::print_warning("In-memory store: data is lost when the server stops.");
    }

    let stores = StoreManager::new(&config.database).await?;
    smartpark_api::run_server(config, stores).await
}
