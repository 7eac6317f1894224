//! Cart controller: the single owner of cart state.
//!
//! Every operation is atomic from the caller's perspective: validate,
//! mutate, persist, notify the view. Validation failures return before
//! any mutation. A persistence failure after a mutation keeps the
//! in-memory result and is surfaced to the caller once; from then on
//! the session runs in-memory only.

use crate::cart::{Cart, CartStore, CartTotals};
use crate::catalog::Catalog;
use crate::checkout::{CartView, Confirmation};
use crate::config::{CheckoutConfig, PricingConfig};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use tracing::{debug, warn};

/// Orchestrates cart mutations against the catalog, the persisted
/// store, and the presentation layer.
pub struct CartController<V: CartView> {
    catalog: Catalog,
    store: CartStore,
    pricing: PricingConfig,
    checkout: CheckoutConfig,
    cart: Cart,
    view: V,
    /// Set after the first failed save; later failures only warn.
    degraded: bool,
}

impl<V: CartView> CartController<V> {
    /// Create a controller, restoring the cart from the store.
    pub fn new(
        catalog: Catalog,
        store: CartStore,
        pricing: PricingConfig,
        checkout: CheckoutConfig,
        view: V,
    ) -> Self {
        let cart = store.load();
        debug!(lines = cart.line_count(), "cart restored");
        Self {
            catalog,
            store,
            pricing,
            checkout,
            cart,
            view,
            degraded: false,
        }
    }

    /// Render the catalog and the restored cart. Call once at startup.
    pub fn bootstrap(&mut self) -> Result<(), CommerceError> {
        self.view.render_catalog(self.catalog.products());
        self.render()
    }

    /// Push the current cart, badge count, and totals to the view.
    pub fn render(&mut self) -> Result<(), CommerceError> {
        let totals = self.totals()?;
        self.view.render_cart(&self.cart);
        self.view.render_cart_count(self.cart.item_count());
        self.view.render_totals(&totals);
        Ok(())
    }

    /// The catalog this controller sells from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Total item count across all lines.
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Current pricing breakdown.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        CartTotals::of(&self.cart, &self.pricing)
    }

    /// Consume the controller, returning the view.
    pub fn into_view(self) -> V {
        self.view
    }

    /// Add one unit of a product to the cart.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<(), CommerceError> {
        let product = self
            .catalog
            .find(id)
            .ok_or(CommerceError::ProductUnavailable(id))?;
        self.cart.add_product(product)?;
        debug!(%id, "added to cart");
        self.commit()
    }

    /// Increment an existing line's quantity by one.
    pub fn increase_quantity(&mut self, id: ProductId) -> Result<(), CommerceError> {
        let product = self
            .catalog
            .find(id)
            .ok_or(CommerceError::ProductUnavailable(id))?;
        self.cart.increase(product)?;
        debug!(%id, "quantity increased");
        self.commit()
    }

    /// Decrement an existing line's quantity by one, removing the line
    /// when it reaches zero.
    pub fn decrease_quantity(&mut self, id: ProductId) -> Result<(), CommerceError> {
        self.cart.decrease(id)?;
        debug!(%id, "quantity decreased");
        self.commit()
    }

    /// Remove a product's line. Not an error if it was absent.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<(), CommerceError> {
        if self.cart.remove(id) {
            debug!(%id, "removed from cart");
        }
        self.commit()
    }

    /// Empty the cart, gated by an external confirmation.
    ///
    /// Returns `Ok(true)` if the cart was cleared, `Ok(false)` if the
    /// user cancelled, and `AlreadyEmpty` if there was nothing to
    /// clear.
    pub fn clear_cart(&mut self, decision: Confirmation) -> Result<bool, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::AlreadyEmpty);
        }
        if decision == Confirmation::Cancelled {
            return Ok(false);
        }

        self.cart.clear();
        debug!("cart cleared");
        self.commit()?;
        Ok(true)
    }

    /// Simulate checkout and return the confirmed order total.
    ///
    /// The total is computed on the current cart and reported to the
    /// view first; after a fixed, non-cancelable delay the cart is
    /// cleared and persisted — with no confirmation gate, unlike
    /// `clear_cart`. If the process dies during the delay, the
    /// persisted cart keeps its pre-checkout contents.
    pub fn checkout(&mut self) -> Result<Money, CommerceError> {
        if self.cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let totals = self.totals()?;
        self.view.show_order_confirmation(totals.total);
        debug!(total = %totals.total, "order confirmed");

        std::thread::sleep(self.checkout.clear_delay());

        self.cart.clear();
        self.commit()?;
        Ok(totals.total)
    }

    /// Dismiss the order confirmation on the view.
    pub fn close_order_confirmation(&mut self) {
        self.view.close_order_confirmation();
    }

    fn commit(&mut self) -> Result<(), CommerceError> {
        let saved = self.store.save(&self.cart);
        self.render()?;
        match saved {
            Ok(()) => Ok(()),
            Err(err) if self.degraded => {
                warn!(%err, "cart persistence still unavailable");
                Ok(())
            }
            Err(err) => {
                // The mutation stands; the first failure is surfaced and
                // the session degrades to in-memory operation.
                self.degraded = true;
                warn!(%err, "cart persistence failed, continuing in memory");
                Err(CommerceError::Persistence(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::catalog::Product;
    use crate::money::Currency;
    use tienda_store::Store;

    /// Records every view call for assertions on notification order.
    #[derive(Debug, Default)]
    struct RecordingView {
        events: Vec<String>,
        last_count: u32,
        last_totals: Option<CartTotals>,
        confirmed_total: Option<Money>,
    }

    impl CartView for RecordingView {
        fn render_catalog(&mut self, products: &[Product]) {
            self.events.push(format!("catalog:{}", products.len()));
        }
        fn render_cart(&mut self, cart: &Cart) {
            self.events.push(format!("cart:{}", cart.line_count()));
        }
        fn render_cart_count(&mut self, count: u32) {
            self.last_count = count;
            self.events.push(format!("count:{count}"));
        }
        fn render_totals(&mut self, totals: &CartTotals) {
            self.last_totals = Some(*totals);
            self.events.push("totals".to_string());
        }
        fn show_order_confirmation(&mut self, total: Money) {
            self.confirmed_total = Some(total);
            self.events.push("confirm".to_string());
        }
        fn close_order_confirmation(&mut self) {
            self.events.push("close".to_string());
        }
    }

    fn controller() -> CartController<RecordingView> {
        controller_with_delay(0)
    }

    fn controller_with_delay(clear_delay_ms: u64) -> CartController<RecordingView> {
        CartController::new(
            Catalog::reference(),
            CartStore::new(Store::in_memory(), Currency::BOB),
            PricingConfig::default(),
            CheckoutConfig { clear_delay_ms },
            RecordingView::default(),
        )
    }

    #[test]
    fn test_add_to_cart_updates_badge() {
        let mut c = controller();
        c.add_to_cart(ProductId::new(1)).unwrap();
        c.add_to_cart(ProductId::new(3)).unwrap();

        assert_eq!(c.item_count(), 2);
        let expected = c.totals().unwrap();
        let view = c.into_view();
        assert_eq!(view.last_count, 2);
        assert_eq!(view.last_totals, Some(expected));
    }

    #[test]
    fn test_add_unknown_product() {
        let mut c = controller();
        let err = c.add_to_cart(ProductId::new(42)).unwrap_err();
        assert!(matches!(err, CommerceError::ProductUnavailable(_)));
        assert!(c.cart().is_empty());
    }

    #[test]
    fn test_stock_gates_add_and_increase() {
        let mut c = controller();
        let camera = ProductId::new(6); // stock 3

        for _ in 0..3 {
            c.add_to_cart(camera).unwrap();
        }
        assert!(matches!(
            c.add_to_cart(camera),
            Err(CommerceError::StockExceeded { stock: 3, .. })
        ));
        assert!(matches!(
            c.increase_quantity(camera),
            Err(CommerceError::StockExceeded { stock: 3, .. })
        ));
        assert_eq!(c.cart().line(camera).unwrap().quantity, 3);
    }

    #[test]
    fn test_decrease_to_zero_removes_line() {
        let mut c = controller();
        let id = ProductId::new(5);
        c.add_to_cart(id).unwrap();
        c.decrease_quantity(id).unwrap();

        assert!(c.cart().is_empty());
        assert!(matches!(
            c.decrease_quantity(id),
            Err(CommerceError::ItemNotInCart(_))
        ));
    }

    #[test]
    fn test_remove_absent_is_not_an_error() {
        let mut c = controller();
        c.remove_from_cart(ProductId::new(2)).unwrap();
        assert!(c.cart().is_empty());
    }

    #[test]
    fn test_clear_on_empty_cart() {
        let mut c = controller();
        assert!(matches!(
            c.clear_cart(Confirmation::Confirmed),
            Err(CommerceError::AlreadyEmpty)
        ));
        // Idempotent: still empty, still AlreadyEmpty
        assert!(matches!(
            c.clear_cart(Confirmation::Confirmed),
            Err(CommerceError::AlreadyEmpty)
        ));
    }

    #[test]
    fn test_clear_cancelled_keeps_cart() {
        let mut c = controller();
        c.add_to_cart(ProductId::new(2)).unwrap();

        assert_eq!(c.clear_cart(Confirmation::Cancelled).unwrap(), false);
        assert_eq!(c.item_count(), 1);
    }

    #[test]
    fn test_clear_confirmed_empties_cart() {
        let mut c = controller();
        c.add_to_cart(ProductId::new(2)).unwrap();

        assert_eq!(c.clear_cart(Confirmation::Confirmed).unwrap(), true);
        assert!(c.cart().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut c = controller();
        assert!(matches!(c.checkout(), Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_checkout_reports_pre_clear_total_then_empties() {
        let mut c = controller();
        c.add_to_cart(ProductId::new(1)).unwrap();
        let expected = c.totals().unwrap().total;

        let reported = c.checkout().unwrap();
        assert_eq!(reported, expected);
        assert_eq!(reported.amount_cents, 1_512_884);
        assert!(c.cart().is_empty());

        let view = c.into_view();
        assert_eq!(view.confirmed_total, Some(expected));

        // Confirmation is shown before the post-clear render
        let confirm_at = view.events.iter().position(|e| e == "confirm").unwrap();
        let last_cart_render = view
            .events
            .iter()
            .rposition(|e| e.starts_with("cart:"))
            .unwrap();
        assert!(confirm_at < last_cart_render);
        assert_eq!(view.events[last_cart_render], "cart:0");
    }

    #[test]
    fn test_checkout_persists_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::reference();

        {
            let store = CartStore::new(Store::open(dir.path()).unwrap(), Currency::BOB);
            let mut c = CartController::new(
                catalog.clone(),
                store,
                PricingConfig::default(),
                CheckoutConfig { clear_delay_ms: 0 },
                RecordingView::default(),
            );
            c.add_to_cart(ProductId::new(4)).unwrap();
            c.checkout().unwrap();
        }

        let store = CartStore::new(Store::open(dir.path()).unwrap(), Currency::BOB);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::reference();

        {
            let store = CartStore::new(Store::open(dir.path()).unwrap(), Currency::BOB);
            let mut c = CartController::new(
                catalog.clone(),
                store,
                PricingConfig::default(),
                CheckoutConfig::default(),
                RecordingView::default(),
            );
            c.add_to_cart(ProductId::new(2)).unwrap();
            c.add_to_cart(ProductId::new(2)).unwrap();
        }

        let store = CartStore::new(Store::open(dir.path()).unwrap(), Currency::BOB);
        let c = CartController::new(
            catalog,
            store,
            PricingConfig::default(),
            CheckoutConfig::default(),
            RecordingView::default(),
        );
        let line: &CartLine = c.cart().line(ProductId::new(2)).unwrap();
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_save_failure_surfaces_once_then_degrades() {
        // A directory squatting on the cart entry makes every save fail
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("cart.json")).unwrap();

        let store = CartStore::new(Store::open(dir.path()).unwrap(), Currency::BOB);
        let mut c = CartController::new(
            Catalog::reference(),
            store,
            PricingConfig::default(),
            CheckoutConfig { clear_delay_ms: 0 },
            RecordingView::default(),
        );

        // First failed save reaches the caller as a blocking notice,
        // but the mutation itself stands
        let err = c.add_to_cart(ProductId::new(1)).unwrap_err();
        assert!(matches!(err, CommerceError::Persistence(_)));
        assert_eq!(c.item_count(), 1);

        // The session then runs in memory without re-surfacing
        c.add_to_cart(ProductId::new(3)).unwrap();
        assert_eq!(c.item_count(), 2);

        // The view saw both mutations
        assert_eq!(c.into_view().last_count, 2);
    }

    #[test]
    fn test_bootstrap_renders_catalog_then_cart() {
        let mut c = controller();
        c.bootstrap().unwrap();

        let view = c.into_view();
        assert_eq!(view.events.first().map(String::as_str), Some("catalog:6"));
        assert!(view.events.iter().any(|e| e == "count:0"));
    }
}
