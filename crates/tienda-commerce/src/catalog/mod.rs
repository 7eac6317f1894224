//! Product catalog.
//!
//! Read-only reference data: a fixed list of products with stock
//! counts. The catalog offers lookup only; nothing in the cart core
//! mutates it.

mod product;

pub use product::Product;

use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// A fixed, read-only product catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a product list.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The six-product reference catalog, priced in bolivianos.
    pub fn reference() -> Self {
        let bob = |amount: f64| Money::from_decimal(amount, Currency::BOB);
        Self::new(vec![
            Product::new(
                1,
                "Laptop Pro",
                "Laptop de alto rendimiento",
                "\u{1f4bb}",
                bob(12999.0),
                5,
            ),
            Product::new(
                2,
                "Smartphone",
                "Teléfono inteligente de última generación",
                "\u{1f4f1}",
                bob(8999.0),
                10,
            ),
            Product::new(
                3,
                "Auriculares",
                "Auriculares inalámbricos con cancelación de ruido",
                "\u{1f3a7}",
                bob(2499.0),
                15,
            ),
            Product::new(
                4,
                "Tablet",
                "Tablet de 10 pulgadas",
                "\u{1f4f1}",
                bob(6999.0),
                8,
            ),
            Product::new(
                5,
                "Smartwatch",
                "Reloj inteligente con GPS",
                "\u{231a}",
                bob(4999.0),
                12,
            ),
            Product::new(
                6,
                "Cámara",
                "Cámara profesional 4K",
                "\u{1f4f7}",
                bob(15999.0),
                3,
            ),
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}
