//! Product inventory: the in-memory collection and the service that owns it.

mod catalog;
pub mod error;
pub mod service;

pub use catalog::*;
pub use error::*;
pub use service::InventoryService;
