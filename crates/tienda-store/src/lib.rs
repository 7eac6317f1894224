//! Type-safe local key-value persistence for Tienda.
//!
//! Provides a simple, ergonomic API for persisting data on the local
//! machine with automatic JSON serialization. Values survive process
//! restarts within the same data directory, which is all the cart
//! needs; there is no networking and no cross-machine replication.
//!
//! # Example
//!
//! ```rust,ignore
//! use tienda_store::Store;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Cart {
//!     items: Vec<CartItem>,
//! }
//!
//! let store = Store::open("~/.tienda")?;
//!
//! // Store a value
//! store.set("cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = store.get("cart")?;
//!
//! // Delete a value
//! store.delete("cart")?;
//! ```

mod error;
mod kv;

pub use error::StoreError;
pub use kv::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Store, StoreError};
}
