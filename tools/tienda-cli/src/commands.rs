//! CLI command implementations.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use tienda_commerce::checkout::{CartController, Confirmation};
use tienda_commerce::ids::ProductId;

use crate::output::Output;
use crate::view::TermView;

type Controller = CartController<TermView>;

/// Show the catalog along with the current cart.
pub fn catalog(controller: &mut Controller) -> Result<()> {
    controller.bootstrap()?;
    Ok(())
}

/// Show the current cart and totals.
pub fn cart(controller: &mut Controller) -> Result<()> {
    controller.render()?;
    Ok(())
}

/// Add one unit of a product.
pub fn add(controller: &mut Controller, id: u32, output: &Output) -> Result<()> {
    controller.add_to_cart(ProductId::new(id))?;
    output.success(&format!("Added product {id} to cart"));
    Ok(())
}

/// Increase an existing line by one unit.
pub fn increase(controller: &mut Controller, id: u32) -> Result<()> {
    controller.increase_quantity(ProductId::new(id))?;
    Ok(())
}

/// Decrease an existing line by one unit.
pub fn decrease(controller: &mut Controller, id: u32) -> Result<()> {
    controller.decrease_quantity(ProductId::new(id))?;
    Ok(())
}

/// Remove a product's line from the cart.
pub fn remove(controller: &mut Controller, id: u32, output: &Output) -> Result<()> {
    controller.remove_from_cart(ProductId::new(id))?;
    output.success(&format!("Removed product {id} from cart"));
    Ok(())
}

/// Empty the cart; prompts for confirmation unless `--yes` was passed.
pub fn clear(controller: &mut Controller, yes: bool, output: &Output) -> Result<()> {
    let decision = if yes {
        Confirmation::Confirmed
    } else {
        confirm_clear()?
    };

    if controller.clear_cart(decision)? {
        output.success("Cart cleared");
    } else {
        output.info("Clear cancelled");
    }
    Ok(())
}

/// Simulate checkout and report the confirmed order total.
pub fn checkout(controller: &mut Controller, output: &Output) -> Result<()> {
    let total = controller.checkout()?;
    controller.close_order_confirmation();
    output.debug(&format!("order total {total}"));
    Ok(())
}

/// Interactive storefront loop.
pub fn shop(controller: &mut Controller, output: &Output) -> Result<()> {
    controller.bootstrap()?;

    loop {
        let actions = [
            "Add product",
            "Increase quantity",
            "Decrease quantity",
            "Remove product",
            "View cart",
            "Clear cart",
            "Checkout",
            "Exit",
        ];
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What next?")
            .items(&actions)
            .default(0)
            .interact()?;

        let result = match choice {
            0 => pick_product(controller)?
                .map(|id| controller.add_to_cart(id))
                .unwrap_or(Ok(())),
            1 => pick_line(controller)?
                .map(|id| controller.increase_quantity(id))
                .unwrap_or(Ok(())),
            2 => pick_line(controller)?
                .map(|id| controller.decrease_quantity(id))
                .unwrap_or(Ok(())),
            3 => pick_line(controller)?
                .map(|id| controller.remove_from_cart(id))
                .unwrap_or(Ok(())),
            4 => controller.render(),
            5 => {
                let decision = confirm_clear()?;
                controller.clear_cart(decision).map(|_| ())
            }
            6 => match controller.checkout() {
                Ok(_) => {
                    controller.close_order_confirmation();
                    Ok(())
                }
                Err(e) => Err(e),
            },
            _ => break,
        };

        // A failed operation is a blocking notice, not the end of the session
        if let Err(err) = result {
            output.error(&err.to_string());
        }
    }

    Ok(())
}

fn confirm_clear() -> Result<Confirmation> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Empty the cart?")
        .default(false)
        .interact()?;
    Ok(if confirmed {
        Confirmation::Confirmed
    } else {
        Confirmation::Cancelled
    })
}

fn pick_product(controller: &Controller) -> Result<Option<ProductId>> {
    let products = controller.catalog().products();
    let labels: Vec<String> = products
        .iter()
        .map(|p| {
            format!(
                "{} {} — {} (stock {})",
                p.emoji,
                p.name,
                p.unit_price.display(),
                p.stock
            )
        })
        .collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which product?")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| products[i].id))
}

fn pick_line(controller: &Controller) -> Result<Option<ProductId>> {
    let lines = controller.cart().lines();
    if lines.is_empty() {
        return Ok(None);
    }
    let labels: Vec<String> = lines
        .iter()
        .map(|l| format!("{} × {}", l.name, l.quantity))
        .collect();
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which item?")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| lines[i].product_id))
}
