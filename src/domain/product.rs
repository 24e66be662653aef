use std::fmt;
use thiserror::Error;

/// Validation failures for product fields.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product id cannot be empty")]
    EmptyId,
    #[error("Product name cannot be empty")]
    EmptyName,
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),
}

/// Represents a product in the inventory.
///
/// Fields are private so every instance went through validation: id and name
/// are trimmed and non-empty, price is a finite non-negative number.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: String,
    name: String,
    quantity: u32,
    price: f64,
}

/// Payload for updating quantity and/or price of an existing product.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductPatch {
    pub quantity: Option<u32>,
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.price.is_none()
    }
}

impl Product {
    /// Creates a validated product.
    ///
    /// # Arguments
    /// * `id` - Unique identifier, trimmed
    /// * `name` - Display name, trimmed
    /// * `quantity` - Units in stock
    /// * `price` - Unit price
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        price: f64,
    ) -> Result<Self, ProductError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ProductError::EmptyId);
        }
        let mut product = Self {
            id,
            name: String::new(),
            quantity,
            price: 0.0,
        };
        product.set_name(name)?;
        product.set_price(price)?;
        Ok(product)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn set_price(&mut self, price: f64) -> Result<(), ProductError> {
        if !price.is_finite() || price < 0.0 {
            return Err(ProductError::InvalidPrice(price));
        }
        self.price = price;
        Ok(())
    }

    /// Applies a patch atomically: nothing changes if any field is invalid.
    pub fn apply(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(price) = patch.price {
            self.set_price(price)?;
        }
        if let Some(quantity) = patch.quantity {
            self.set_quantity(quantity);
        }
        Ok(())
    }

    /// Value of the units in stock.
    pub fn stock_value(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Quantity: {} | Price: ${:.2}",
            self.id, self.name, self.quantity, self.price
        )
    }
}
