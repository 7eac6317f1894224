//! Shopping cart module.
//!
//! Contains the cart and line item types, the pricing engine, and the
//! persistence layer.

mod cart;
mod pricing;
mod store;

pub use cart::{Cart, CartLine};
pub use pricing::CartTotals;
pub use store::{CartStore, CART_KEY};
