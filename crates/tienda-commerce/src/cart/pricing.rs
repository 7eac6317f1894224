//! Cart pricing calculations.
//!
//! Pure and deterministic: the same cart and config always produce the
//! same breakdown. Display formatting is the presentation layer's
//! concern; the amounts here are exact centavo values.

use crate::cart::Cart;
use crate::config::PricingConfig;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Flat shipping, zero for an empty cart.
    pub shipping: Money,
    /// Final total (subtotal + tax + shipping).
    pub total: Money,
}

impl CartTotals {
    /// Compute the breakdown for a cart.
    ///
    /// Returns an error only on arithmetic overflow.
    pub fn of(cart: &Cart, pricing: &PricingConfig) -> Result<Self, CommerceError> {
        let line_subtotals = cart
            .lines()
            .iter()
            .map(|line| line.subtotal().ok_or(CommerceError::Overflow))
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = Money::try_sum(line_subtotals.iter(), pricing.currency)
            .ok_or(CommerceError::Overflow)?;

        let tax = subtotal.multiply_decimal(pricing.tax_rate);

        let shipping = if cart.is_empty() {
            Money::zero(pricing.currency)
        } else {
            pricing.shipping_cost()
        };

        let total = subtotal
            .try_add(&tax)
            .and_then(|t| t.try_add(&shipping))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            shipping,
            total,
        })
    }
}
