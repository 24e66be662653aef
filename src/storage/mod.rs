//! Whole-inventory persistence: every save rewrites the file, every load
//! reads all of it back.

mod atomic;
pub mod flat_file;
pub mod json;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use crate::domain::Product;

pub use atomic::write_atomic;
pub use flat_file::FlatFileStore;
pub use json::JsonStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid record {index} in {path}: {reason}")]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        reason: String,
    },
    #[error("Product {id} cannot be written as a line: {reason}")]
    Unencodable { id: String, reason: String },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }
}

/// What a load produced, including what had to be skipped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    pub products: Vec<Product>,
    pub corrupt_lines: usize,
    pub duplicates: usize,
}

impl LoadReport {
    pub fn has_warnings(&self) -> bool {
        self.corrupt_lines > 0 || self.duplicates > 0
    }
}

/// Storage backend for the inventory service.
pub trait InventoryStore: Send + 'static {
    fn path(&self) -> &Path;

    fn load(&self) -> Result<LoadReport, StorageError>;

    /// Replaces the stored inventory with `products`.
    fn save(&self, products: &[Product]) -> Result<(), StorageError>;

    /// Fails if `product` could never be written by this store.
    fn check(&self, _product: &Product) -> Result<(), StorageError> {
        Ok(())
    }
}

/// On-disk format of the inventory file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    /// `id|name|quantity|price`, one product per line.
    Flat,
    /// `{"productos": [...]}`.
    Json,
}

impl StorageFormat {
    pub fn default_path(self) -> &'static str {
        match self {
            StorageFormat::Flat => "inventory.txt",
            StorageFormat::Json => "inventory.json",
        }
    }
}

impl FromStr for StorageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" | "txt" | "text" => Ok(StorageFormat::Flat),
            "json" => Ok(StorageFormat::Json),
            other => Err(format!("unknown inventory format '{}', expected 'flat' or 'json'", other)),
        }
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageFormat::Flat => f.write_str("flat"),
            StorageFormat::Json => f.write_str("json"),
        }
    }
}

pub fn open_store(format: StorageFormat, path: impl Into<PathBuf>) -> Box<dyn InventoryStore> {
    match format {
        StorageFormat::Flat => Box::new(FlatFileStore::new(path)),
        StorageFormat::Json => Box::new(JsonStore::new(path)),
    }
}
