//! Money type for representing monetary values.
//!
//! Uses centavo-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Bolivian boliviano, the reference deployment currency.
    #[default]
    BOB,
    USD,
    EUR,
    MXN,
}

impl Currency {
    /// Get the currency code (e.g., "BOB").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BOB => "BOB",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::MXN => "MXN",
        }
    }

    /// Get the currency symbol (e.g., "bs").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BOB => "bs ",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::MXN => "MX$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "BOB" => Some(Currency::BOB),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "MXN" => Some(Currency::MXN),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (centavos).
/// This avoids floating-point precision issues; the only rounding in
/// the system happens when a fractional rate is applied (tax).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., centavos).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from centavos.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use tienda_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(12999.0, Currency::BOB);
    /// assert_eq!(price.amount_cents, 1_299_900);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "bs 12999.00").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if currencies don't match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_cents.checked_add(other.amount_cents)?,
            self.currency,
        ))
    }

    /// Try to multiply by a scalar, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        Some(Money::new(
            self.amount_cents.checked_mul(factor)?,
            self.currency,
        ))
    }

    /// Multiply by a decimal factor (e.g., a tax rate), rounding to the
    /// nearest centavo.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let new_amount = (self.amount_cents as f64 * factor).round() as i64;
        Money::new(new_amount, self.currency)
    }

    /// Sum an iterator of Money values, returning `None` on currency
    /// mismatch or overflow.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        let mut acc = Money::zero(currency);
        for m in iter {
            acc = acc.try_add(m)?;
        }
        Some(acc)
    }
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics if currencies don't match. Use `try_add` for fallible addition.
    fn add(self, other: Money) -> Money {
        self.try_add(&other)
            .expect("Currency mismatch or overflow in addition")
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.try_multiply(factor)
            .expect("Overflow in multiplication")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_cents() {
        let m = Money::new(249_900, Currency::BOB);
        assert_eq!(m.amount_cents, 249_900);
        assert_eq!(m.currency, Currency::BOB);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::USD);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        let m = Money::from_decimal(12999.0, Currency::BOB);
        assert_eq!(m.display(), "bs 12999.00");

        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::BOB);
        let b = Money::new(500, Currency::BOB);
        assert_eq!((a + b).amount_cents, 1500);
    }

    #[test]
    fn test_money_multiply() {
        let m = Money::new(1000, Currency::BOB);
        assert_eq!((m * 5).amount_cents, 5000);
    }

    #[test]
    fn test_multiply_decimal_rounds() {
        // 16% of bs 12999.00 is bs 2079.84 exactly
        let m = Money::from_decimal(12999.0, Currency::BOB);
        assert_eq!(m.multiply_decimal(0.16).amount_cents, 207_984);
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let bob = Money::new(1000, Currency::BOB);
        let usd = Money::new(1000, Currency::USD);
        assert!(bob.try_add(&usd).is_none());
    }

    #[test]
    fn test_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::BOB);
        assert!(m.try_multiply(2).is_none());
    }

    #[test]
    fn test_try_sum() {
        let values = [
            Money::new(100, Currency::BOB),
            Money::new(250, Currency::BOB),
        ];
        let total = Money::try_sum(values.iter(), Currency::BOB).unwrap();
        assert_eq!(total.amount_cents, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("bob"), Some(Currency::BOB));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
