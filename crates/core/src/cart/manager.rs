//! Cart state manager.

use crate::store::{KeyValueStore, keys};
use crate::types::ProductId;
use crate::view::CartView;

use super::{AddOutcome, Cart, CartLine, CartSummary, NewCartItem};

/// Owns the in-memory cart and persists it after every mutation.
///
/// The store is passed to each mutating call rather than held, so the same
/// store can also back other widgets (the theme) without shared ownership.
/// A failed save is logged and otherwise ignored: the in-memory cart stays
/// authoritative for the rest of the interaction.
#[derive(Debug, Clone, Default)]
pub struct CartManager {
    cart: Cart,
}

impl CartManager {
    /// Load the cart from `store`, or start empty.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let cart = store
            .load(keys::CART)
            .map(|raw| Cart::from_json_lenient(&raw))
            .unwrap_or_default();
        Self { cart }
    }

    /// Wrap an existing cart without touching any store.
    #[must_use]
    pub const fn from_cart(cart: Cart) -> Self {
        Self { cart }
    }

    /// Add one unit of `item`, merging with an existing line for the same id.
    pub fn add_item<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        item: NewCartItem,
    ) -> AddOutcome {
        let id = item.id.clone();
        let outcome = self.cart.add(item);
        tracing::debug!(product_id = %id, ?outcome, "Added item to cart");
        self.persist(store);
        outcome
    }

    /// Remove the whole line at `index`.
    ///
    /// Indices come from the most recent render; any mutation since then may
    /// have shifted them. An out-of-range index is a caller bug: it trips a
    /// debug assertion and is a logged no-op in release builds.
    pub fn remove_item<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        index: usize,
    ) -> Option<CartLine> {
        debug_assert!(
            index < self.cart.len(),
            "cart index {index} out of range (len {})",
            self.cart.len()
        );

        let Some(removed) = self.cart.remove_at(index) else {
            tracing::warn!(index, len = self.cart.len(), "Ignoring out-of-range cart index");
            return None;
        };
        tracing::debug!(product_id = %removed.id, index, "Removed cart line");
        self.persist(store);
        Some(removed)
    }

    /// Remove the whole line for `id`. Unknown ids are a no-op.
    pub fn remove_by_id<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        id: &ProductId,
    ) -> Option<CartLine> {
        let removed = self.cart.remove_by_id(id);
        match &removed {
            Some(line) => {
                tracing::debug!(product_id = %line.id, "Removed cart line");
                self.persist(store);
            }
            None => tracing::debug!(product_id = %id, "Remove for product not in cart"),
        }
        removed
    }

    /// Totals over the current cart.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// View model for the current cart.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::project(&self.cart)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Re-serialize the whole cart to the store.
    fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        let json = match self.cart.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = store.save(keys::CART, &json) {
            tracing::warn!(error = %e, lines = self.cart.len(), "Failed to persist cart");
        }
    }
}
