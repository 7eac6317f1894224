//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;
use tienda_store::StoreError;

/// Errors that can occur in cart operations.
///
/// Every variant maps to a blocking notice shown to the user; no
/// operation partially mutates the cart before returning one of these.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product missing from the catalog or out of stock.
    #[error("Product not available: {0}")]
    ProductUnavailable(ProductId),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Requested quantity would exceed available stock.
    #[error("No more stock available for {product} (stock {stock})")]
    StockExceeded { product: String, stock: u32 },

    /// Checkout attempted on an empty cart.
    #[error("The cart is empty")]
    EmptyCart,

    /// Clear attempted on an already-empty cart.
    #[error("The cart is already empty")]
    AlreadyEmpty,

    /// Arithmetic overflow or currency mismatch in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Persisted store unreadable or unwritable.
    #[error("Persistence unavailable: {0}")]
    Persistence(#[from] StoreError),
}
