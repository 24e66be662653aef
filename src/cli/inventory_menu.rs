use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::debug;
use crate::clients::InventoryClient;
use crate::domain::{Product, ProductPatch};
use crate::messages::{Applied, SaveStatus};
use super::{CliError, Console};

const MENU: &str = "
=== INVENTORY MANAGEMENT ===
1) Add product
2) Remove product by ID
3) Update quantity or price
4) Search products by name
5) Show all products
6) Show inventory summary
7) Save inventory
0) Back";

fn save_note(save: &SaveStatus) -> String {
    match save {
        SaveStatus::Saved => "Changes written to file.".to_string(),
        SaveStatus::Pending => "Not saved yet; choose 7 to save.".to_string(),
        SaveStatus::Failed(reason) => format!("Warning: change kept in memory, but the file could not be written: {}", reason),
    }
}

async fn report<R, W>(console: &mut Console<R, W>, what: &str, applied: &Applied) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    console.say(format!("{} {}", what, save_note(&applied.save))).await
}

/// Runs the inventory menu until the user goes back. Saves before returning.
pub async fn run<R, W>(console: &mut Console<R, W>, client: &InventoryClient) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        console.say(MENU).await?;
        let choice = console.ask("Select an option: ").await?;
        debug!(choice = %choice, "Inventory menu");

        match choice.as_str() {
            "1" => add_product(console, client).await?,
            "2" => {
                let id = console.read_text("ID to remove: ").await?;
                match client.remove(id).await {
                    Ok(applied) => report(console, "Product removed.", &applied).await?,
                    Err(e) => console.say(format!("Error: {}", e)).await?,
                }
            }
            "3" => update_product(console, client).await?,
            "4" => {
                let query = console.read_text("Name or part of the name: ").await?;
                match client.search(query).await {
                    Ok(found) if found.is_empty() => console.say("No products found.").await?,
                    Ok(found) => {
                        console.say(format!("Found {} product(s):", found.len())).await?;
                        for product in &found {
                            console.say(product.to_string()).await?;
                        }
                    }
                    Err(e) => console.say(format!("Error: {}", e)).await?,
                }
            }
            "5" => match client.list().await {
                Ok(all) if all.is_empty() => console.say("Inventory is empty.").await?,
                Ok(all) => {
                    console.say("\n--- PRODUCT LIST ---").await?;
                    for product in &all {
                        console.say(product.to_string()).await?;
                    }
                }
                Err(e) => console.say(format!("Error: {}", e)).await?,
            },
            "6" => match client.summary().await {
                Ok(summary) => {
                    console.say("\n--- SUMMARY ---").await?;
                    console.say(format!("Distinct products: {}", summary.distinct)).await?;
                    console.say(format!("Total units: {}", summary.units)).await?;
                    console.say(format!("Total inventory value: ${:.2}", summary.value)).await?;
                }
                Err(e) => console.say(format!("Error: {}", e)).await?,
            },
            "7" => match client.save().await {
                Ok(()) => console.say("Inventory saved.").await?,
                Err(e) => console.say(format!("Error: {}", e)).await?,
            },
            "0" => {
                match client.save().await {
                    Ok(()) => console.say("Inventory saved.").await?,
                    Err(e) => console.say(format!("Error: {}", e)).await?,
                }
                return Ok(());
            }
            _ => console.say("Invalid option. Try again.").await?,
        }
    }
}

async fn add_product<R, W>(console: &mut Console<R, W>, client: &InventoryClient) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = console.read_text("ID (unique): ").await?;
    if let Ok(Some(_)) = client.get(id.clone()).await {
        return console.say("Error: that ID already exists. Product not added.").await;
    }
    let name = console.read_text("Name: ").await?;
    if let Ok(true) = client.contains_name(name.clone()).await {
        console.say(format!("Note: a product named '{}' already exists under another ID.", name)).await?;
    }
    let quantity = console.read_u32("Quantity (>=0): ").await?;
    let price = console.read_f64_min("Price (>=0): ", 0.0).await?;

    let product = match Product::new(id, name, quantity, price) {
        Ok(product) => product,
        Err(e) => return console.say(format!("Error: {}", e)).await,
    };
    match client.add(product).await {
        Ok(applied) => report(console, "Product added.", &applied).await,
        Err(e) => console.say(format!("Error: {}", e)).await,
    }
}

async fn update_product<R, W>(console: &mut Console<R, W>, client: &InventoryClient) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = console.read_text("ID to update: ").await?;
    let current = match client.get(id.clone()).await {
        Ok(Some(product)) => product,
        Ok(None) => return console.say("No product with that ID.").await,
        Err(e) => return console.say(format!("Error: {}", e)).await,
    };
    console.say("Current product:").await?;
    console.say(current.to_string()).await?;

    console.say("What do you want to update?\n1) Quantity\n2) Price\n3) Both").await?;
    let patch = match console.ask("Option: ").await?.as_str() {
        "1" => ProductPatch {
            quantity: Some(console.read_u32("New quantity (>=0): ").await?),
            price: None,
        },
        "2" => ProductPatch {
            quantity: None,
            price: Some(console.read_f64_min("New price (>=0): ", 0.0).await?),
        },
        "3" => ProductPatch {
            quantity: Some(console.read_u32("New quantity (>=0): ").await?),
            price: Some(console.read_f64_min("New price (>=0): ", 0.0).await?),
        },
        _ => return console.say("Invalid option.").await,
    };

    match client.update(id, patch).await {
        Ok(applied) => report(console, "Product updated.", &applied).await,
        Err(e) => console.say(format!("Error: {}", e)).await,
    }
}
