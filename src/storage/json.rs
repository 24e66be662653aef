use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use crate::domain::Product;
use super::{write_atomic, InventoryStore, LoadReport, StorageError};

/// Wire shape of one product. Keys follow the existing inventory files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductRecord {
    id: String,
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "cantidad")]
    quantity: u32,
    #[serde(rename = "precio")]
    price: f64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct InventoryDocument {
    #[serde(rename = "productos", default)]
    products: Vec<ProductRecord>,
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            quantity: product.quantity(),
            price: product.price(),
        }
    }
}

/// Whole inventory as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InventoryStore for JsonStore {
    fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<LoadReport, StorageError> {
        if !self.path.exists() {
            info!("No inventory document yet, starting empty");
            return Ok(LoadReport::default());
        }
        let text = std::fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        let document: InventoryDocument = serde_json::from_str(&text).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;

        let mut products = Vec::with_capacity(document.products.len());
        for (index, record) in document.products.into_iter().enumerate() {
            let product = Product::new(record.id, record.name, record.quantity, record.price).map_err(|e| {
                StorageError::InvalidRecord {
                    path: self.path.clone(),
                    index,
                    reason: e.to_string(),
                }
            })?;
            products.push(product);
        }
        debug!(products = products.len(), "JSON document loaded");
        Ok(LoadReport { products, ..LoadReport::default() })
    }

    #[instrument(skip(self, products), fields(path = %self.path.display(), count = products.len()))]
    fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        let document = InventoryDocument {
            products: products.iter().map(ProductRecord::from).collect(),
        };
        let json = serde_json::to_string_pretty(&document).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_atomic(&self.path, json.as_bytes())?;
        debug!("JSON document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, quantity: u32, price: f64) -> Product {
        Product::new(id, name, quantity, price).unwrap()
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("inventory.json"));
        let products = vec![product("p1", "Piña", 3, 1.5), product("p2", "Rice|Beans", 0, 0.0)];

        store.save(&products).unwrap();

        assert_eq!(store.load().unwrap().products, products);
    }

    #[test]
    fn test_document_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        JsonStore::new(&path).save(&[product("p1", "Piña", 3, 1.5)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Piña"));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "productos": [{"id": "p1", "nombre": "Piña", "cantidad": 3, "precio": 1.5}]
            })
        );
    }

    #[test]
    fn test_missing_file_is_empty_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let report = JsonStore::new(dir.path().join("absent.json")).load().unwrap();
        assert!(report.products.is_empty());
    }

    #[test]
    fn test_malformed_and_invalid_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.json");

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonStore::new(&path).load(), Err(StorageError::Json { .. })));

        std::fs::write(
            &path,
            r#"{"productos": [{"id": "p1", "nombre": " ", "cantidad": 1, "precio": 1.0}]}"#,
        )
        .unwrap();
        assert!(matches!(
            JsonStore::new(&path).load(),
            Err(StorageError::InvalidRecord { index: 0, .. })
        ));

        std::fs::write(&path, "{}").unwrap();
        assert!(JsonStore::new(&path).load().unwrap().products.is_empty());
    }
}
