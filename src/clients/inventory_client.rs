use tokio::sync::mpsc;
use crate::domain::{Product, ProductPatch};
use crate::inventory::{InventoryError, InventorySummary};
use crate::messages::{Applied, InventoryRequest};

/// Client for interacting with the inventory service.
#[derive(Clone)]
pub struct InventoryClient {
    sender: mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }
}

client_method!(InventoryClient => fn add(product: Product) -> Applied as InventoryRequest::Add, Error = InventoryError);
client_method!(InventoryClient => fn remove(id: String) -> Applied as InventoryRequest::Remove, Error = InventoryError);
client_method!(InventoryClient => fn update(id: String, patch: ProductPatch) -> Applied as InventoryRequest::Update, Error = InventoryError);
client_method!(InventoryClient => fn get(id: String) -> Option<Product> as InventoryRequest::Get, Error = InventoryError);
client_method!(InventoryClient => fn search(query: String) -> Vec<Product> as InventoryRequest::Search, Error = InventoryError);
client_method!(InventoryClient => fn list() -> Vec<Product> as InventoryRequest::List, Error = InventoryError);
client_method!(InventoryClient => fn summary() -> InventorySummary as InventoryRequest::Summary, Error = InventoryError);
client_method!(InventoryClient => fn contains_name(name: String) -> bool as InventoryRequest::ContainsName, Error = InventoryError);
client_method!(InventoryClient => fn save() -> () as InventoryRequest::Save, Error = InventoryError);
client_method!(InventoryClient => fn shutdown() -> () as InventoryRequest::Shutdown, Error = InventoryError);
