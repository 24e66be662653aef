use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};
use crate::clients::InventoryClient;
use crate::domain::{Product, ProductPatch};
use crate::messages::{Applied, InventoryRequest, SaveStatus, ServiceResponse};
use crate::storage::{InventoryStore, LoadReport, StorageError};
use super::{Inventory, InventoryError};

/// Owns the inventory and its store; serves [`InventoryRequest`]s one at a time.
pub struct InventoryService {
    receiver: mpsc::Receiver<InventoryRequest>,
    inventory: Inventory,
    store: Box<dyn InventoryStore>,
    autosave: bool,
    dirty: bool,
}

impl InventoryService {
    pub fn new(
        buffer_size: usize,
        inventory: Inventory,
        store: Box<dyn InventoryStore>,
        autosave: bool,
    ) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            inventory,
            store,
            autosave,
            dirty: false,
        };
        (service, InventoryClient::new(sender))
    }

    /// Loads the store and builds a service around what it holds.
    pub fn open(
        buffer_size: usize,
        store: Box<dyn InventoryStore>,
        autosave: bool,
    ) -> Result<(Self, InventoryClient, LoadReport), StorageError> {
        let mut report = store.load()?;
        let (inventory, duplicates) = Inventory::from_products(report.products.drain(..));
        report.duplicates += duplicates;
        report.products = inventory.list();
        if report.has_warnings() {
            warn!(
                corrupt = report.corrupt_lines,
                duplicates = report.duplicates,
                "Inventory loaded with skipped records"
            );
        }
        if inventory.is_empty() {
            info!(path = %store.path().display(), "Inventory is empty");
        } else {
            info!(path = %store.path().display(), products = inventory.len(), "Inventory loaded");
        }
        let (service, client) = Self::new(buffer_size, inventory, store, autosave);
        Ok((service, client, report))
    }

    #[instrument(name = "inventory_service", skip(self))]
    pub async fn run(mut self) {
        info!(autosave = self.autosave, "InventoryService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                InventoryRequest::Add { product, respond_to } => {
                    self.handle_add(product, respond_to);
                }
                InventoryRequest::Remove { id, respond_to } => {
                    self.handle_remove(id, respond_to);
                }
                InventoryRequest::Update { id, patch, respond_to } => {
                    self.handle_update(id, patch, respond_to);
                }
                InventoryRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.inventory.get(&id).cloned()));
                }
                InventoryRequest::Search { query, respond_to } => {
                    let found = self.inventory.search_by_name(&query);
                    debug!(query = %query, found = found.len(), "Search served");
                    let _ = respond_to.send(Ok(found));
                }
                InventoryRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.inventory.list()));
                }
                InventoryRequest::Summary { respond_to } => {
                    let _ = respond_to.send(Ok(self.inventory.summary()));
                }
                InventoryRequest::ContainsName { name, respond_to } => {
                    let _ = respond_to.send(Ok(self.inventory.contains_name(&name)));
                }
                InventoryRequest::Save { respond_to } => {
                    let _ = respond_to.send(self.save());
                }
                InventoryRequest::Shutdown { respond_to } => {
                    info!("InventoryService shutting down");
                    let _ = respond_to.send(self.flush());
                    break;
                }
            }
        }
        if let Err(e) = self.flush() {
            error!(error = %e, "Final save failed, unsaved changes lost");
        }
        info!("InventoryService stopped");
    }

    #[instrument(fields(product_id = %product.id()), skip(self, product, respond_to))]
    fn handle_add(&mut self, product: Product, respond_to: ServiceResponse<Applied, InventoryError>) {
        debug!("Processing add request");
        let result = self.admit(&product).map(|()| {
            info!(product_name = %product.name(), "Product added");
            self.applied(product)
        });
        let _ = respond_to.send(result);
    }

    /// Stores `product` unless its id is taken or the store could not write it.
    fn admit(&mut self, product: &Product) -> Result<(), InventoryError> {
        if self.inventory.contains(product.id()) {
            return Err(InventoryError::AlreadyExists(product.id().to_string()));
        }
        if let Err(e) = self.store.check(product) {
            warn!(error = %e, "Product rejected by the store");
            return Err(e.into());
        }
        self.inventory.add(product.clone())
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_remove(&mut self, id: String, respond_to: ServiceResponse<Applied, InventoryError>) {
        debug!("Processing remove request");
        let result = self.inventory.remove(&id).map(|product| {
            info!("Product removed");
            self.applied(product)
        });
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_update(&mut self, id: String, patch: ProductPatch, respond_to: ServiceResponse<Applied, InventoryError>) {
        debug!("Processing update request");
        let result = self.inventory.update(&id, patch).cloned().map(|product| {
            info!(quantity = product.quantity(), price = product.price(), "Product updated");
            self.applied(product)
        });
        let _ = respond_to.send(result);
    }

    /// Records a mutation and applies the autosave policy.
    fn applied(&mut self, product: Product) -> Applied {
        self.dirty = true;
        let save = if !self.autosave {
            SaveStatus::Pending
        } else {
            match self.save() {
                Ok(()) => SaveStatus::Saved,
                Err(e) => {
                    error!(error = %e, "Autosave failed, change kept in memory");
                    SaveStatus::Failed(e.to_string())
                }
            }
        };
        Applied { product, save }
    }

    fn save(&mut self) -> Result<(), InventoryError> {
        self.store.save(&self.inventory.list())?;
        self.dirty = false;
        debug!(path = %self.store.path().display(), "Inventory saved");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), InventoryError> {
        if self.dirty {
            self.save()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FlatFileStore;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    /// In-memory store that records every save and can be told to fail.
    #[derive(Clone, Default)]
    struct RecordingStore {
        saves: Arc<Mutex<Vec<Vec<Product>>>>,
        fail: Arc<Mutex<bool>>,
        initial: Vec<Product>,
    }

    impl InventoryStore for RecordingStore {
        fn path(&self) -> &Path {
            Path::new("memory")
        }

        fn load(&self) -> Result<LoadReport, StorageError> {
            Ok(LoadReport { products: self.initial.clone(), ..LoadReport::default() })
        }

        fn save(&self, products: &[Product]) -> Result<(), StorageError> {
            if *self.fail.lock().unwrap() {
                return Err(StorageError::io(
                    &PathBuf::from("memory"),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.saves.lock().unwrap().push(products.to_vec());
            Ok(())
        }
    }

    fn product(id: &str, name: &str, quantity: u32, price: f64) -> Product {
        Product::new(id, name, quantity, price).unwrap()
    }

    fn spawn(store: RecordingStore, autosave: bool) -> (InventoryClient, tokio::task::JoinHandle<()>) {
        let (service, client, _) = InventoryService::open(8, Box::new(store), autosave).unwrap();
        (client, tokio::spawn(service.run()))
    }

    #[tokio::test]
    async fn test_autosave_writes_after_each_mutation() {
        let store = RecordingStore::default();
        let (client, handle) = spawn(store.clone(), true);

        let added = client.add(product("p1", "Rice", 3, 1.5)).await.unwrap();
        assert_eq!(added.save, SaveStatus::Saved);
        client.update("p1".into(), ProductPatch { quantity: Some(5), price: None }).await.unwrap();
        let removed = client.remove("p1".into()).await.unwrap();
        assert_eq!(removed.product.quantity(), 5);

        let saves = store.saves.lock().unwrap().clone();
        assert_eq!(saves.len(), 3);
        assert_eq!(saves[1][0].quantity(), 5);
        assert!(saves[2].is_empty());

        client.shutdown().await.unwrap();
        handle.await.unwrap();
        assert_eq!(store.saves.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_manual_save_and_flush_on_shutdown() {
        let store = RecordingStore::default();
        let (client, handle) = spawn(store.clone(), false);

        let added = client.add(product("p1", "Rice", 3, 1.5)).await.unwrap();
        assert_eq!(added.save, SaveStatus::Pending);
        assert!(store.saves.lock().unwrap().is_empty());

        client.save().await.unwrap();
        assert_eq!(store.saves.lock().unwrap().len(), 1);

        client.add(product("p2", "Beans", 1, 2.0)).await.unwrap();
        client.shutdown().await.unwrap();
        handle.await.unwrap();

        let saves = store.saves.lock().unwrap().clone();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[1].len(), 2);
    }

    #[tokio::test]
    async fn test_failed_autosave_keeps_change_in_memory() {
        let store = RecordingStore::default();
        *store.fail.lock().unwrap() = true;
        let (client, _handle) = spawn(store.clone(), true);

        let added = client.add(product("p1", "Rice", 3, 1.5)).await.unwrap();
        assert!(matches!(added.save, SaveStatus::Failed(_)));
        assert!(client.get("p1".into()).await.unwrap().is_some());

        assert!(matches!(client.save().await, Err(InventoryError::Storage(_))));
    }

    #[tokio::test]
    async fn test_unwritable_product_rejected_and_later_adds_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");
        let (service, client, _) =
            InventoryService::open(8, Box::new(FlatFileStore::new(&path)), true).unwrap();
        let handle = tokio::spawn(service.run());

        let err = client.add(product("p1", "Rice|Beans", 3, 1.5)).await.unwrap_err();
        assert!(matches!(err, InventoryError::Storage(StorageError::Unencodable { .. })));
        assert!(client.get("p1".into()).await.unwrap().is_none());
        assert!(!client.contains_name("rice|beans".into()).await.unwrap());

        let added = client.add(product("p2", "Salt", 2, 0.75)).await.unwrap();
        assert_eq!(added.save, SaveStatus::Saved);
        client.shutdown().await.unwrap();
        handle.await.unwrap();

        let reloaded = FlatFileStore::new(&path).load().unwrap();
        assert_eq!(reloaded.products, vec![product("p2", "Salt", 2, 0.75)]);
    }

    #[tokio::test]
    async fn test_rejections_do_not_save() {
        let store = RecordingStore {
            initial: vec![product("p1", "Rice", 3, 1.5)],
            ..RecordingStore::default()
        };
        let (client, _handle) = spawn(store.clone(), true);

        let dup = client.add(product("p1", "Other", 1, 1.0)).await.unwrap_err();
        assert!(matches!(dup, InventoryError::AlreadyExists(_)));
        let missing = client.remove("p9".into()).await.unwrap_err();
        assert!(matches!(missing, InventoryError::NotFound(_)));
        assert!(store.saves.lock().unwrap().is_empty());

        assert!(client.contains_name("RICE".into()).await.unwrap());
        assert_eq!(client.search("ric".into()).await.unwrap().len(), 1);
        assert_eq!(client.summary().await.unwrap().units, 3);
        assert_eq!(client.list().await.unwrap().len(), 1);
    }
}
