use std::collections::{HashMap, HashSet};
use crate::domain::{Product, ProductPatch};
use super::InventoryError;

/// Counts returned by [`Inventory::summary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventorySummary {
    pub distinct: usize,
    pub units: u64,
    /// Rounded to two decimals.
    pub value: f64,
}

/// Products keyed by id, with a set of normalized names on the side.
///
/// The name set is a cache: it is extended on insert and rebuilt from the
/// products after any removal.
#[derive(Debug, Default, Clone)]
pub struct Inventory {
    products: HashMap<String, Product>,
    name_index: HashSet<String>,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory keeping the first product seen for each id.
    /// Returns the inventory and how many duplicates were dropped.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> (Self, usize) {
        let mut inventory = Self::new();
        let mut duplicates = 0;
        for product in products {
            if inventory.products.contains_key(product.id()) {
                duplicates += 1;
                continue;
            }
            inventory.products.insert(product.id().to_string(), product);
        }
        inventory.rebuild_index();
        (inventory, duplicates)
    }

    fn rebuild_index(&mut self) {
        self.name_index = self.products.values().map(|p| normalize(p.name())).collect();
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.products.contains_key(id.trim())
    }

    /// Exact, case-insensitive name lookup through the name index.
    pub fn contains_name(&self, name: &str) -> bool {
        self.name_index.contains(&normalize(name))
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id.trim())
    }

    pub fn add(&mut self, product: Product) -> Result<(), InventoryError> {
        if self.products.contains_key(product.id()) {
            return Err(InventoryError::AlreadyExists(product.id().to_string()));
        }
        self.name_index.insert(normalize(product.name()));
        self.products.insert(product.id().to_string(), product);
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Product, InventoryError> {
        let id = id.trim();
        let removed = self
            .products
            .remove(id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        self.rebuild_index();
        Ok(removed)
    }

    pub fn update(&mut self, id: &str, patch: ProductPatch) -> Result<&Product, InventoryError> {
        let id = id.trim();
        if patch.is_empty() {
            return Err(InventoryError::EmptyUpdate(id.to_string()));
        }
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        product.apply(patch)?;
        Ok(product)
    }

    /// Partial, case-insensitive match on the name, sorted by name then id.
    /// A blank query matches nothing.
    pub fn search_by_name(&self, query: &str) -> Vec<Product> {
        let query = normalize(query);
        if query.is_empty() {
            return Vec::new();
        }
        let mut found: Vec<Product> = self
            .products
            .values()
            .filter(|p| normalize(p.name()).contains(&query))
            .cloned()
            .collect();
        sort_by_name(&mut found);
        found
    }

    /// Every product, sorted by name then id.
    pub fn list(&self) -> Vec<Product> {
        let mut all: Vec<Product> = self.products.values().cloned().collect();
        sort_by_name(&mut all);
        all
    }

    pub fn summary(&self) -> InventorySummary {
        let units = self.products.values().map(|p| u64::from(p.quantity())).sum();
        let value: f64 = self.products.values().map(Product::stock_value).sum();
        InventorySummary {
            distinct: self.products.len(),
            units,
            value: (value * 100.0).round() / 100.0,
        }
    }
}

fn sort_by_name(products: &mut [Product]) {
    products.sort_by(|a, b| {
        normalize(a.name())
            .cmp(&normalize(b.name()))
            .then_with(|| a.id().cmp(b.id()))
    });
}
