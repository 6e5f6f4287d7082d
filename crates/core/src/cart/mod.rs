//! Shopping cart.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s: insertion order is display
//! order, there is at most one line per product id, and every line has a
//! quantity of at least one. The [`CartManager`] owns a cart, applies the
//! widget's mutations and persists after each one.

mod manager;

pub use manager::CartManager;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// One row in the cart.
///
/// The serialized field names match the persisted `cart` entry:
/// `{id, name, price, image, quantity}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Stable product identifier, the merge key.
    pub id: ProductId,
    /// Display name captured when the product was added.
    pub name: String,
    /// Unit price captured when the product was added.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Image URL captured when the product was added.
    #[serde(rename = "image")]
    pub image_url: String,
    /// Number of units, always at least one.
    pub quantity: u32,
}

impl CartLine {
    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Product details for an add-to-cart, already validated and resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub id: ProductId,
    /// Display name, already resolved through the fallback chain.
    pub name: String,
    pub unit_price: Price,
    /// Image URL, already resolved through the fallback chain.
    pub image_url: String,
}

/// What an add did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Inserted,
    /// An existing line's quantity was incremented to `quantity`.
    Incremented { quantity: u32 },
}

/// Aggregates derived from the cart, recomputed on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of all line quantities.
    pub total_quantity: u64,
    /// Sum of `unit_price * quantity` over all lines.
    pub total_price: Price,
}

/// Ordered sequence of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Decode a persisted cart, treating anything unreadable as empty.
    ///
    /// `null`, malformed JSON and non-array values all yield an empty cart.
    /// Lines with a zero quantity are dropped and repeated ids are merged into
    /// their first occurrence, so a tampered entry cannot break the
    /// one-line-per-id invariant.
    #[must_use]
    pub fn from_json_lenient(raw: &str) -> Self {
        match serde_json::from_str::<Option<Vec<CartLine>>>(raw) {
            Ok(lines) => Self::normalized(lines.unwrap_or_default()),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable persisted cart");
                Self::new()
            }
        }
    }

    /// Build a cart from raw lines, restoring the invariants.
    #[must_use]
    pub fn normalized(raw: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in raw.into_iter().filter(|line| line.quantity > 0) {
            match cart.lines.iter_mut().find(|existing| existing.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Serialize to the persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.lines)
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Position of the line for `id`, if present.
    #[must_use]
    pub fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }

    /// Merge `item` into the cart.
    pub fn add(&mut self, item: NewCartItem) -> AddOutcome {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return AddOutcome::Incremented {
                quantity: line.quantity,
            };
        }

        self.lines.push(CartLine {
            id: item.id,
            name: item.name,
            unit_price: item.unit_price,
            image_url: item.image_url,
            quantity: 1,
        });
        AddOutcome::Inserted
    }

    /// Remove the whole line at `index`, if it exists.
    pub fn remove_at(&mut self, index: usize) -> Option<CartLine> {
        (index < self.lines.len()).then(|| self.lines.remove(index))
    }

    /// Remove the whole line for `id`, if it exists.
    pub fn remove_by_id(&mut self, id: &ProductId) -> Option<CartLine> {
        self.position(id).map(|index| self.lines.remove(index))
    }

    /// Total quantity and total price.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.lines
            .iter()
            .fold(CartSummary::default(), |acc, line| CartSummary {
                total_quantity: acc.total_quantity.saturating_add(u64::from(line.quantity)),
                total_price: acc.total_price.saturating_add(line.line_total()),
            })
    }
}
