//! Cart and line item types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A shopping cart: an ordered list of line items.
///
/// Lines keep their insertion order (the order a product was first
/// added). At most one line exists per product id, every line has
/// quantity >= 1, and no line's quantity exceeds the referenced
/// product's stock. Code outside this module never edits lines
/// directly; the mutation methods below uphold those invariants.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from already-validated lines (persistence path).
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total item count (sum of quantities), for the cart badge.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product, if present.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == id)
    }

    /// Add one unit of a product.
    ///
    /// Appends a quantity-1 line with the price snapshotted from the
    /// product, or increments the existing line. Fails without mutation
    /// if the product has no stock or the line is already at the stock
    /// cap.
    pub fn add_product(&mut self, product: &Product) -> Result<(), CommerceError> {
        if !product.is_available() {
            return Err(CommerceError::ProductUnavailable(product.id));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            if line.quantity >= product.stock {
                return Err(CommerceError::StockExceeded {
                    product: product.name.clone(),
                    stock: product.stock,
                });
            }
            line.quantity += 1;
            return Ok(());
        }

        self.lines.push(CartLine::snapshot(product));
        Ok(())
    }

    /// Increment the quantity of an existing line by one.
    ///
    /// Fails without mutation if the line is absent or already at the
    /// stock cap.
    pub fn increase(&mut self, product: &Product) -> Result<(), CommerceError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
            .ok_or(CommerceError::ItemNotInCart(product.id))?;

        if line.quantity >= product.stock {
            return Err(CommerceError::StockExceeded {
                product: product.name.clone(),
                stock: product.stock,
            });
        }
        line.quantity += 1;
        Ok(())
    }

    /// Decrement the quantity of an existing line by one.
    ///
    /// A line at quantity 1 is removed entirely; a zero-quantity line
    /// is never retained.
    pub fn decrease(&mut self, id: ProductId) -> Result<(), CommerceError> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.product_id == id)
            .ok_or(CommerceError::ItemNotInCart(id))?;

        if self.lines[idx].quantity > 1 {
            self.lines[idx].quantity -= 1;
        } else {
            self.lines.remove(idx);
        }
        Ok(())
    }

    /// Remove the line for a product. Returns whether a line was removed;
    /// removing an absent line is a no-op, not an error.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.product_id != id);
        self.lines.len() < len_before
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// One product's entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Referenced product.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Price captured at add-time; a later catalog change does not
    /// reprice lines already in the cart.
    pub unit_price: Money,
    /// Decorative emoji snapshot.
    pub emoji: Option<String>,
    /// Quantity, always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a product into a fresh quantity-1 line.
    pub fn snapshot(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            emoji: Some(product.emoji.clone()),
            quantity: 1,
        }
    }

    /// Line subtotal (unit price times quantity), `None` on overflow.
    pub fn subtotal(&self) -> Option<Money> {
        self.unit_price.try_multiply(self.quantity as i64)
    }
}
