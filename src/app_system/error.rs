use thiserror::Error;
use crate::domain::ReservationError;
use crate::hotel::HotelError;
use crate::inventory::InventoryError;
use crate::storage::StorageError;

/// Errors raised while starting or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Could not load inventory: {0}")]
    Storage(#[from] StorageError),
    #[error("Inventory service error: {0}")]
    Inventory(#[from] InventoryError),
    #[error("Hotel setup error: {0}")]
    Hotel(#[from] HotelError),
    #[error("Invalid seed data: {0}")]
    Seed(#[from] ReservationError),
    #[error("Service task failed: {0}")]
    Task(String),
}
