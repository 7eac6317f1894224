//! Newtype ID for type-safe product references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog product identifier.
///
/// The catalog assigns small positive integers; cart lines reference
/// products by this id only (weak reference, lookup at use time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Create a new ID from a raw integer.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
