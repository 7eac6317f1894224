//! Checkout module.
//!
//! The cart controller and the presentation-layer contract it talks to.

mod controller;
mod view;

pub use controller::CartController;
pub use view::{CartView, Confirmation, NullView};
