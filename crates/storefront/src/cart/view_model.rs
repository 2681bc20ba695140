//! Cart view-model.
//!
//! A short-lived projection of the persisted snapshot that derives totals
//! and pushes every mutation straight back through the store. Totals are
//! recomputed from the lines on every call - never cached - so they can
//! not go stale.

use rust_decimal::Decimal;

use makiya_core::ProductId;

use super::store::{CartLine, CartStore, CartStoreError};

/// In-memory cart state backed by a [`CartStore`].
#[derive(Debug)]
pub struct Cart<'a> {
    store: &'a CartStore,
    lines: Vec<CartLine>,
}

impl<'a> Cart<'a> {
    /// Load the current cart from the store.
    #[must_use]
    pub fn load(store: &'a CartStore) -> Self {
        Self {
            store,
            lines: store.load(),
        }
    }

    /// Current line items, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Exact cart total, recomputed from the lines on every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Append a line. Upstream data is trusted; no merging by product id.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn add_line(&mut self, line: CartLine) -> Result<(), CartStoreError> {
        self.lines.push(line);
        self.store.save(&self.lines)
    }

    /// Set the quantity of the line with `product_id`, clamped to a
    /// minimum of 1. Unknown ids leave the lines unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartStoreError> {
        for line in self.lines.iter_mut().filter(|l| l.product_id == product_id) {
            line.quantity = quantity.max(1);
        }
        self.store.save(&self.lines)
    }

    /// Adjust the quantity of the line with `product_id` by `delta`,
    /// clamped to a minimum of 1 - decrementing below 1 is a no-op, not a
    /// removal.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn adjust_quantity(&mut self, product_id: ProductId, delta: i64) -> Result<(), CartStoreError> {
        for line in self.lines.iter_mut().filter(|l| l.product_id == product_id) {
            let next = i64::from(line.quantity).saturating_add(delta);
            line.quantity = u32::try_from(next.max(1)).unwrap_or(u32::MAX);
        }
        self.store.save(&self.lines)
    }

    /// Remove the line with `product_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn remove_line(&mut self, product_id: ProductId) -> Result<(), CartStoreError> {
        self.lines.retain(|l| l.product_id != product_id);
        self.store.save(&self.lines)
    }

    /// Drop every line.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be persisted.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.lines.clear();
        self.store.save(&self.lines)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::events::CartEvents;
    use makiya_core::AllergyFlag;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn temp_store() -> CartStore {
        let path = std::env::temp_dir().join(format!(
            "makiya-cart-vm-{}.json",
            uuid::Uuid::new_v4()
        ));
        CartStore::new(path, CartEvents::new())
    }

    fn line(product_id: i32, unit_price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(product_id),
            name: format!("Maki {product_id}"),
            unit_price: dec(unit_price),
            quantity,
            image_ref: String::new(),
            variant_label: "5 rolls".to_string(),
            allergy_flag: AllergyFlag::No,
        }
    }

    fn cleanup(store: &CartStore) {
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn test_total_is_exact_sum() {
        let store = temp_store();
        let mut cart = Cart::load(&store);
        cart.add_line(line(7, "18.50", 2)).unwrap();
        cart.add_line(line(3, "9.90", 3)).unwrap();

        assert_eq!(cart.total(), dec("66.70"));
        assert_eq!(cart.item_count(), 5);
        cleanup(&store);
    }

    #[test]
    fn test_mutations_persist_immediately() {
        let store = temp_store();
        let mut cart = Cart::load(&store);
        cart.add_line(line(7, "18.50", 2)).unwrap();
        cart.set_quantity(ProductId::new(7), 4).unwrap();

        // The persisted snapshot matches the in-memory state after every
        // operation (round-trip law).
        assert_eq!(store.load(), cart.lines());

        cart.remove_line(ProductId::new(7)).unwrap();
        assert_eq!(store.load(), cart.lines());
        assert!(store.load().is_empty());
        cleanup(&store);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let store = temp_store();
        let mut cart = Cart::load(&store);
        cart.add_line(line(7, "18.50", 2)).unwrap();

        cart.set_quantity(ProductId::new(7), 0).unwrap();
        assert_eq!(cart.lines().first().unwrap().quantity, 1);
        cleanup(&store);
    }

    #[test]
    fn test_adjust_quantity_never_drops_below_one() {
        let store = temp_store();
        let mut cart = Cart::load(&store);
        cart.add_line(line(7, "18.50", 2)).unwrap();

        cart.adjust_quantity(ProductId::new(7), -100).unwrap();
        assert_eq!(cart.lines().first().unwrap().quantity, 1);

        cart.adjust_quantity(ProductId::new(7), 1).unwrap();
        assert_eq!(cart.lines().first().unwrap().quantity, 2);
        cleanup(&store);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let store = temp_store();
        let mut cart = Cart::load(&store);
        cart.add_line(line(7, "18.50", 2)).unwrap();

        cart.set_quantity(ProductId::new(99), 5).unwrap();
        assert_eq!(cart.lines().first().unwrap().quantity, 2);
        assert_eq!(cart.lines().len(), 1);
        cleanup(&store);
    }

    #[test]
    fn test_zero_quantity_delta_does_not_change_total() {
        let store = temp_store();
        let mut cart = Cart::load(&store);
        cart.add_line(line(7, "18.50", 2)).unwrap();
        let before = cart.total();

        cart.adjust_quantity(ProductId::new(7), 0).unwrap();
        assert_eq!(cart.total(), before);
        cleanup(&store);
    }

    #[test]
    fn test_duplicate_product_lines_stay_independent() {
        let store = temp_store();
        let mut cart = Cart::load(&store);
        cart.add_line(line(7, "18.50", 2)).unwrap();
        cart.add_line(line(7, "18.50", 1)).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.total(), dec("55.50"));

        // Removal by product id drops every matching line.
        cart.remove_line(ProductId::new(7)).unwrap();
        assert!(cart.is_empty());
        cleanup(&store);
    }
}
