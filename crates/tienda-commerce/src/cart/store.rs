//! Cart persistence over the local key-value store.
//!
//! The whole cart lives under a single key as an ordered array of line
//! records. Loading fails soft: an absent or malformed entry yields an
//! empty cart and a warning, never an error to the caller.

use crate::cart::{Cart, CartLine};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tienda_store::{Store, StoreError};
use tracing::{debug, warn};

/// Key the serialized cart is stored under.
pub const CART_KEY: &str = "cart";

/// Durable storage for one cart.
pub struct CartStore {
    store: Store,
    currency: Currency,
}

impl CartStore {
    /// Wrap a key-value store. `currency` interprets the stored decimal
    /// prices, which are currency-agnostic on the wire.
    pub fn new(store: Store, currency: Currency) -> Self {
        Self { store, currency }
    }

    /// Load the persisted cart, or an empty cart if nothing usable is
    /// stored.
    pub fn load(&self) -> Cart {
        match self.store.get::<Vec<StoredLine>>(CART_KEY) {
            Ok(Some(records)) => {
                let lines = records
                    .into_iter()
                    .filter(|r| r.quantity >= 1)
                    .map(|r| r.into_line(self.currency))
                    .collect();
                Cart::from_lines(lines)
            }
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(%err, "persisted cart unreadable, starting empty");
                Cart::new()
            }
        }
    }

    /// Serialize the full cart and overwrite the persisted entry.
    pub fn save(&self, cart: &Cart) -> Result<(), StoreError> {
        let records: Vec<StoredLine> = cart.lines().iter().map(StoredLine::from_line).collect();
        self.store.set(CART_KEY, &records)?;
        debug!(lines = records.len(), "cart persisted");
        Ok(())
    }
}

/// Wire format of one persisted cart line.
///
/// Field names and types are part of the external contract: `price` is
/// a decimal amount in major units, `emoji` is optional decoration.
#[derive(Debug, Serialize, Deserialize)]
struct StoredLine {
    id: u32,
    name: String,
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emoji: Option<String>,
    quantity: u32,
}

impl StoredLine {
    fn from_line(line: &CartLine) -> Self {
        Self {
            id: line.product_id.get(),
            name: line.name.clone(),
            price: line.unit_price.to_decimal(),
            emoji: line.emoji.clone(),
            quantity: line.quantity,
        }
    }

    fn into_line(self, currency: Currency) -> CartLine {
        CartLine {
            product_id: ProductId::new(self.id),
            name: self.name,
            unit_price: Money::from_decimal(self.price, currency),
            emoji: self.emoji,
            quantity: self.quantity,
        }
    }
}
