use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use crate::domain::Product;
use super::{write_atomic, InventoryStore, LoadReport, StorageError};

const SEPARATOR: char = '|';

/// Why a line could not be read back as a product.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LineError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid quantity '{0}'")]
    Quantity(String),
    #[error("invalid price '{0}'")]
    Price(String),
    #[error("{0}")]
    Product(#[from] crate::domain::ProductError),
}

/// Renders a product as `id|name|quantity|price`.
pub fn format_line(product: &Product) -> Result<String, StorageError> {
    for (field, value) in [("id", product.id()), ("name", product.name())] {
        if value.contains(|c: char| c == SEPARATOR || c == '\n' || c == '\r') {
            return Err(StorageError::Unencodable {
                id: product.id().to_string(),
                reason: format!("{} contains '{}' or a line break", field, SEPARATOR),
            });
        }
    }
    Ok(format!(
        "{}{sep}{}{sep}{}{sep}{}",
        product.id(),
        product.name(),
        product.quantity(),
        product.price(),
        sep = SEPARATOR
    ))
}

/// Parses one `id|name|quantity|price` line. Fields are trimmed.
pub fn parse_line(line: &str) -> Result<Product, LineError> {
    let fields: Vec<&str> = line.trim().split(SEPARATOR).map(str::trim).collect();
    let &[id, name, quantity, price] = fields.as_slice() else {
        return Err(LineError::FieldCount(fields.len()));
    };
    let quantity: u32 = quantity
        .parse()
        .map_err(|_| LineError::Quantity(quantity.to_string()))?;
    let price: f64 = price
        .parse()
        .map_err(|_| LineError::Price(price.to_string()))?;
    Ok(Product::new(id, name, quantity, price)?)
}

/// Pipe-delimited text file, one product per line.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates an empty file if none exists yet.
    fn ensure_file(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            return Ok(());
        }
        info!(path = %self.path.display(), "Creating empty inventory file");
        write_atomic(&self.path, b"")
    }
}

impl InventoryStore for FlatFileStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn check(&self, product: &Product) -> Result<(), StorageError> {
        format_line(product).map(|_| ())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<LoadReport, StorageError> {
        self.ensure_file()?;
        let bytes = fs::read(&self.path).map_err(|e| StorageError::io(&self.path, e))?;

        let mut report = LoadReport::default();
        let mut seen = std::collections::HashSet::new();
        for (index, raw) in bytes.split(|&b| b == b'\n').enumerate() {
            let line = match std::str::from_utf8(raw) {
                Ok(line) => line,
                Err(e) => {
                    warn!(line = index + 1, error = %e, "Skipping line that is not UTF-8");
                    report.corrupt_lines += 1;
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok(product) => {
                    if seen.insert(product.id().to_string()) {
                        report.products.push(product);
                    } else {
                        warn!(line = index + 1, id = %product.id(), "Skipping duplicate product id");
                        report.duplicates += 1;
                    }
                }
                Err(e) => {
                    warn!(line = index + 1, error = %e, "Skipping corrupt line");
                    report.corrupt_lines += 1;
                }
            }
        }
        debug!(
            products = report.products.len(),
            corrupt = report.corrupt_lines,
            "Flat file loaded"
        );
        Ok(report)
    }

    #[instrument(skip(self, products), fields(path = %self.path.display(), count = products.len()))]
    fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        let mut text = String::new();
        for product in products {
            text.push_str(&format_line(product)?);
            text.push('\n');
        }
        write_atomic(&self.path, text.as_bytes())?;
        debug!("Flat file written");
        Ok(())
    }
}
