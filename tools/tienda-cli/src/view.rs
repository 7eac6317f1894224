//! Terminal implementation of the cart view contract.

use console::style;
use tienda_commerce::cart::{Cart, CartTotals};
use tienda_commerce::catalog::Product;
use tienda_commerce::checkout::CartView;
use tienda_commerce::money::Money;

/// Renders the storefront to stdout with console styling.
#[derive(Debug, Default)]
pub struct TermView;

impl CartView for TermView {
    fn render_catalog(&mut self, products: &[Product]) {
        println!("\n{}", style("Catalog").bold().underlined());
        for product in products {
            let stock = if !product.is_available() {
                style("out of stock".to_string()).red()
            } else if product.is_low_stock() {
                style(format!("only {} left!", product.stock)).yellow()
            } else {
                style(format!("{} available", product.stock)).dim()
            };
            println!(
                "  {} {:<2} {:<12} {:>12}  {}",
                product.emoji,
                style(product.id).dim(),
                product.name,
                product.unit_price.display(),
                stock,
            );
            println!("       {}", style(&product.description).dim());
        }
    }

    fn render_cart(&mut self, cart: &Cart) {
        println!("\n{}", style("Your cart").bold().underlined());
        if cart.is_empty() {
            println!("  {}", style("Your cart is empty").dim());
            return;
        }
        for line in cart.lines() {
            let subtotal = line
                .subtotal()
                .map(|m| m.display())
                .unwrap_or_else(|| "—".to_string());
            println!(
                "  {} {:<12} {:>12} × {:<2} = {}",
                line.emoji.as_deref().unwrap_or(" "),
                line.name,
                line.unit_price.display(),
                line.quantity,
                subtotal,
            );
        }
    }

    fn render_cart_count(&mut self, count: u32) {
        println!("  {}", style(format!("items: {count}")).dim());
    }

    fn render_totals(&mut self, totals: &CartTotals) {
        // The summary panel is hidden for an empty cart
        if totals.total.is_zero() {
            return;
        }
        println!("  {}", style("—".repeat(34)).dim());
        println!("  {:<10} {:>20}", "Subtotal", totals.subtotal.display());
        println!("  {:<10} {:>20}", "Tax", totals.tax.display());
        println!("  {:<10} {:>20}", "Shipping", totals.shipping.display());
        println!(
            "  {:<10} {:>20}",
            style("Total").bold(),
            style(totals.total.display()).bold().green()
        );
    }

    fn show_order_confirmation(&mut self, total: Money) {
        println!(
            "\n{} {}",
            style("✓ Order confirmed!").bold().green(),
            style(format!("Total: {}", total.display())).bold()
        );
    }

    fn close_order_confirmation(&mut self) {
        println!("{}", style("Thanks for shopping at Tienda.").dim());
    }
}
