//! Runtime configuration for pricing and checkout.
//!
//! Defaults carry the reference-deployment values; the presentation
//! layer may load overrides from a TOML file.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pricing parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingConfig {
    /// Tax rate as a fraction of the subtotal.
    pub tax_rate: f64,
    /// Flat shipping cost in major units, charged on non-empty carts.
    pub flat_shipping: f64,
    /// Deployment currency.
    pub currency: Currency,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.16,
            flat_shipping: 50.0,
            currency: Currency::BOB,
        }
    }
}

impl PricingConfig {
    /// Flat shipping cost as Money.
    pub fn shipping_cost(&self) -> Money {
        Money::from_decimal(self.flat_shipping, self.currency)
    }
}

/// Checkout parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Fixed delay between reporting the order total and clearing the
    /// cart, in milliseconds. Not cancelable once checkout starts.
    pub clear_delay_ms: u64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self { clear_delay_ms: 500 }
    }
}

impl CheckoutConfig {
    /// The clear delay as a Duration.
    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let pricing = PricingConfig::default();
        assert!((pricing.tax_rate - 0.16).abs() < f64::EPSILON);
        assert_eq!(pricing.shipping_cost().amount_cents, 5000);
        assert_eq!(pricing.currency, Currency::BOB);

        assert_eq!(CheckoutConfig::default().clear_delay(), Duration::from_millis(500));
    }
}
