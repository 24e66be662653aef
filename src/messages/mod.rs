use tokio::sync::oneshot;
use crate::domain::{Product, ProductPatch};
use crate::inventory::{InventoryError, InventorySummary};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// What happened to the file after a mutation was applied in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveStatus {
    /// Written to the store.
    Saved,
    /// Autosave is off; kept until the next explicit save.
    Pending,
    /// The write failed; the change is only in memory.
    Failed(String),
}

/// A mutation that took effect, with the product it touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub product: Product,
    pub save: SaveStatus,
}

/// Typed messages for the inventory service. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum InventoryRequest {
    Add {
        product: Product,
        respond_to: ServiceResponse<Applied, InventoryError>,
    },
    Remove {
        id: String,
        respond_to: ServiceResponse<Applied, InventoryError>,
    },
    Update {
        id: String,
        patch: ProductPatch,
        respond_to: ServiceResponse<Applied, InventoryError>,
    },
    Get {
        id: String,
        respond_to: ServiceResponse<Option<Product>, InventoryError>,
    },
    Search {
        query: String,
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    List {
        respond_to: ServiceResponse<Vec<Product>, InventoryError>,
    },
    Summary {
        respond_to: ServiceResponse<InventorySummary, InventoryError>,
    },
    ContainsName {
        name: String,
        respond_to: ServiceResponse<bool, InventoryError>,
    },
    Save {
        respond_to: ServiceResponse<(), InventoryError>,
    },
    Shutdown {
        respond_to: ServiceResponse<(), InventoryError>,
    },
}
