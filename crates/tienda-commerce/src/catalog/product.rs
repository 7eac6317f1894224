//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Products are created once at startup from static configuration and
/// never mutated. `stock` is the maximum number of units one cart may
/// hold; successful purchases do not decrement it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Short description for listings.
    pub description: String,
    /// Decorative emoji shown in place of a product image.
    pub emoji: String,
    /// Unit price.
    pub unit_price: Money,
    /// Remaining available units.
    pub stock: u32,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        emoji: impl Into<String>,
        unit_price: Money,
        stock: u32,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            description: description.into(),
            emoji: emoji.into(),
            unit_price,
            stock,
        }
    }

    /// Check if the product can be added to a cart at all.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// Check if the remaining stock should be flagged as low.
    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock < 5
    }
}
