//! Presentation layer contract.
//!
//! The controller knows nothing about how the cart is displayed or how
//! the user is asked questions; it pushes state through this trait and
//! receives decisions as explicit values. No blocking UI call ever
//! happens inside the core.

use crate::cart::{Cart, CartTotals};
use crate::catalog::Product;
use crate::money::Money;

/// Outcome of an external yes/no gate, collected by the presentation
/// layer before a destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// Render target the controller notifies after every state change.
pub trait CartView {
    /// Full catalog, rendered once at startup.
    fn render_catalog(&mut self, products: &[Product]);

    /// Current cart contents.
    fn render_cart(&mut self, cart: &Cart);

    /// Total item count for the cart badge.
    fn render_cart_count(&mut self, count: u32);

    /// Derived totals for the summary panel.
    fn render_totals(&mut self, totals: &CartTotals);

    /// Confirmed order amount, shown before the cart is cleared.
    fn show_order_confirmation(&mut self, total: Money);

    /// Dismiss the order confirmation.
    fn close_order_confirmation(&mut self);
}

/// View that renders nothing, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl CartView for NullView {
    fn render_catalog(&mut self, _products: &[Product]) {}
    fn render_cart(&mut self, _cart: &Cart) {}
    fn render_cart_count(&mut self, _count: u32) {}
    fn render_totals(&mut self, _totals: &CartTotals) {}
    fn show_order_confirmation(&mut self, _total: Money) {}
    fn close_order_confirmation(&mut self) {}
}
