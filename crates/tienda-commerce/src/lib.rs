//! Shopping cart domain types and logic for Tienda.
//!
//! This crate is the core of a local, single-user storefront:
//!
//! - **Catalog**: fixed product list with per-product stock
//! - **Cart**: ordered line items with add/increase/decrease/remove
//! - **Pricing**: pure subtotal/tax/shipping/total computation
//! - **Checkout**: the controller that persists state and drives a view
//!
//! # Example
//!
//! ```rust,ignore
//! use tienda_commerce::prelude::*;
//! use tienda_store::Store;
//!
//! let store = CartStore::new(Store::open("~/.tienda")?, Currency::BOB);
//! let mut controller = CartController::new(
//!     Catalog::reference(),
//!     store,
//!     PricingConfig::default(),
//!     CheckoutConfig::default(),
//!     NullView,
//! );
//!
//! controller.add_to_cart(ProductId::new(1))?;
//! let totals = controller.totals()?;
//! println!("Total: {}", totals.total.display());
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{CheckoutConfig, PricingConfig};
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, Product};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartStore, CartTotals, CART_KEY};

    // Checkout
    pub use crate::checkout::{CartController, CartView, Confirmation, NullView};
}
