use thiserror::Error;
use crate::domain::ProductError;
use crate::storage::StorageError;

/// Errors that can occur during inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product already exists: {0}")]
    AlreadyExists(String),
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Nothing to update for product {0}")]
    EmptyUpdate(String),
    #[error("Product validation error: {0}")]
    Validation(#[from] ProductError),
    #[error("Inventory storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
