use tracing::{info, error};
use crate::clients::{HotelClient, InventoryClient};
use crate::config::AppConfig;
use crate::hotel;
use crate::inventory::InventoryService;
use crate::storage::{self, LoadReport};
use super::SystemError;

/// The main application system that owns every service task.
///
/// Responsible for starting up the services, wiring them together, and handling shutdown.
pub struct InventorySystem {
    pub inventory_client: InventoryClient,
    pub hotel_client: HotelClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    /// Loads the inventory, starts all services and seeds the hotel.
    ///
    /// Also returns what the inventory load skipped so the caller can warn the user.
    pub async fn start(config: &AppConfig) -> Result<(Self, LoadReport), SystemError> {
        // 1. Inventory service
        let store = storage::open_store(config.inventory_format, &config.inventory_path);
        let (inventory_service, inventory_client, report) =
            InventoryService::open(32, store, config.autosave)?;
        let inventory_handle = tokio::spawn(inventory_service.run());

        // 2. Hotel actors
        let (room_actor, reservation_actor, hotel_client) = hotel::new(config.hotel_name.clone());
        let room_handle = tokio::spawn(room_actor.run());
        let reservation_handle = tokio::spawn(reservation_actor.run());

        if config.seed_rooms {
            for room in hotel::default_rooms()? {
                hotel_client.add_room(room).await?;
            }
        }

        info!(
            format = %config.inventory_format,
            path = %config.inventory_path.display(),
            hotel = %config.hotel_name,
            "System started"
        );

        let system = Self {
            inventory_client,
            hotel_client,
            handles: vec![inventory_handle, room_handle, reservation_handle],
        };
        Ok((system, report))
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        // The inventory service saves pending changes before it stops
        let saved = self.inventory_client.shutdown().await;

        // Resource actors stop once their channels close
        drop(self.inventory_client);
        drop(self.hotel_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Service task failed: {:?}", e);
                return Err(SystemError::Task(e.to_string()));
            }
        }

        saved?;
        info!("System shutdown complete.");
        Ok(())
    }
}
