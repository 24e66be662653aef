mod domain;
mod clients;
mod messages;
mod config;
mod storage;
mod inventory;
mod hotel;
mod cli;

mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;

use anyhow::Context;
use tokio::io::BufReader;
use tracing::{error, info};
use crate::app_system::{InventorySystem, setup_tracing};
use crate::cli::Console;
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_level);

    info!(format = %config.inventory_format, "Starting inventory application");

    let (system, report) = InventorySystem::start(&config)
        .await
        .context("Could not start the application")?;

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    let location = config.inventory_path.display().to_string();
    cli::announce_load(&mut console, &location, &report).await?;

    if let Err(e) = cli::run(&mut console, &system.inventory_client, &system.hotel_client).await {
        error!(error = %e, "Console session failed");
    }

    // Shutdown saves whatever is still pending
    system.shutdown().await.context("Shutdown failed")?;
    console.say("Goodbye.").await?;

    info!("Application completed successfully");
    Ok(())
}
