//! Persisted cart snapshot.
//!
//! The cart is a JSON array of line items stored at a fixed path for the
//! current profile. Reads fail soft: a missing, unreadable, or unparseable
//! snapshot is an empty cart, never an error. Writes replace the whole
//! snapshot (last writer wins - within one process all cart mutations are
//! serialized on the request path).

use std::fs;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use makiya_core::{AllergyFlag, ProductId, price};

use super::events::CartEvents;

/// Errors that can occur when persisting the cart snapshot.
///
/// Loading never fails; only writes surface errors.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// Writing the snapshot file failed.
    #[error("failed to persist cart snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the snapshot failed.
    #[error("failed to encode cart snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One product selection in the cart.
///
/// Identity key is `product_id`. Re-adding a product that is already in
/// the cart appends a second independent line; lines are never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default)]
    pub variant_label: String,
    #[serde(default)]
    pub allergy_flag: AllergyFlag,
}

impl CartLine {
    /// Exact line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        price::line_total(self.unit_price, self.quantity)
    }
}

/// File-backed store for the cart snapshot.
///
/// Every mutating call emits a change notification on the injected
/// [`CartEvents`] channel so other surfaces re-read the snapshot.
#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
    events: CartEvents,
}

impl CartStore {
    /// Create a store over the snapshot file at `path`.
    pub fn new(path: impl Into<PathBuf>, events: CartEvents) -> Self {
        Self {
            path: path.into(),
            events,
        }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the current snapshot.
    ///
    /// Fails soft: a missing file is an empty cart, and a corrupt snapshot
    /// is logged and treated as an empty cart.
    #[must_use]
    pub fn load(&self) -> Vec<CartLine> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read cart snapshot, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt cart snapshot, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace the snapshot with `lines` and notify observers.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or written.
    pub fn save(&self, lines: &[CartLine]) -> Result<(), CartStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string(lines)?;
        fs::write(&self.path, raw)?;

        self.events.notify_changed();
        Ok(())
    }

    /// Append one line to the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn append(&self, line: CartLine) -> Result<(), CartStoreError> {
        let mut lines = self.load();
        lines.push(line);
        self.save(&lines)
    }

    /// Reset the snapshot to an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn clear(&self) -> Result<(), CartStoreError> {
        self.save(&[])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn temp_store() -> CartStore {
        let path = std::env::temp_dir().join(format!(
            "makiya-cart-store-{}.json",
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

    #[test]
    fn test_missing_snapshot_is_empty_cart() {
        let store = temp_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let store = temp_store();
        let lines = vec![line(7, "18.50", 2), line(3, "9.90", 1)];

        store.save(&lines).unwrap();
        assert_eq!(store.load(), lines);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_append_preserves_existing_lines() {
        let store = temp_store();
        store.append(line(7, "18.50", 2)).unwrap();
        store.append(line(3, "9.90", 1)).unwrap();

        let lines = store.load();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.first().unwrap().product_id, ProductId::new(7));

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_append_same_product_creates_second_line() {
        let store = temp_store();
        store.append(line(7, "18.50", 2)).unwrap();
        store.append(line(7, "18.50", 1)).unwrap();

        // Lines are never merged by product id.
        assert_eq!(store.load().len(), 2);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_corrupt_snapshot_is_empty_cart() {
        let store = temp_store();
        fs::write(store.path(), "{not json[").unwrap();

        assert!(store.load().is_empty());

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_clear_writes_empty_list() {
        let store = temp_store();
        store.append(line(7, "18.50", 2)).unwrap();
        store.clear().unwrap();

        assert!(store.load().is_empty());
        // The file itself holds an empty JSON array, not nothing.
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");

        let _ = fs::remove_file(store.path());
    }

    #[tokio::test]
    async fn test_mutations_notify_observers() {
        let events = CartEvents::new();
        let mut rx = events.subscribe();
        let path = std::env::temp_dir().join(format!(
            "makiya-cart-store-{}.json",
            uuid::Uuid::new_v4()
        ));
        let store = CartStore::new(path, events);

        store.append(line(7, "18.50", 2)).unwrap();
        assert_eq!(rx.recv().await.unwrap(), super::super::CartEvent::Changed);

        store.clear().unwrap();
        assert_eq!(rx.recv().await.unwrap(), super::super::CartEvent::Changed);

        let _ = fs::remove_file(store.path());
    }
}
