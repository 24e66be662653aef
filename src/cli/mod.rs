//! Numbered text menus on top of the service clients.

mod console;
pub mod hotel_menu;
pub mod inventory_menu;

pub use console::Console;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncWrite};
use crate::clients::{HotelClient, InventoryClient};
use crate::storage::LoadReport;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Input closed")]
    InputClosed,
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

const MAIN_MENU: &str = "
=== MAIN MENU ===
1) Inventory
2) Hotel reservations
0) Exit";

/// Tells the user what the inventory load skipped, if anything.
pub async fn announce_load<R, W>(console: &mut Console<R, W>, location: &str, report: &LoadReport) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    console
        .say(format!("Inventory loaded from '{}': {} product(s).", location, report.products.len()))
        .await?;
    if report.corrupt_lines > 0 {
        console
            .say(format!("Warning: {} corrupt line(s) were ignored.", report.corrupt_lines))
            .await?;
    }
    if report.duplicates > 0 {
        console
            .say(format!("Warning: {} duplicate ID(s) were ignored.", report.duplicates))
            .await?;
    }
    Ok(())
}

/// Runs the main menu until the user exits. End of input counts as exit.
pub async fn run<R, W>(
    console: &mut Console<R, W>,
    inventory: &InventoryClient,
    hotel: &HotelClient,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match main_menu(console, inventory, hotel).await {
        Err(CliError::InputClosed) => Ok(()),
        other => other,
    }
}

async fn main_menu<R, W>(
    console: &mut Console<R, W>,
    inventory: &InventoryClient,
    hotel: &HotelClient,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        console.say(MAIN_MENU).await?;
        match console.ask("Select an option: ").await?.as_str() {
            "1" => inventory_menu::run(console, inventory).await?,
            "2" => hotel_menu::run(console, hotel).await?,
            "0" => return Ok(()),
            _ => console.say("Invalid option. Try again.").await?,
        }
    }
}
