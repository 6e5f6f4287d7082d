//! Cart view-model projection.
//!
//! [`CartView::project`] is a pure function of the cart. The host re-runs it
//! after every change and hands the result to its template; there is no
//! diffing and no view state kept between renders.

use crate::cart::Cart;

/// Message shown in place of the line list when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Giỏ hàng trống";

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Position in the cart at projection time. Only valid until the next
    /// mutation.
    pub index: usize,
    /// Stable product id, the preferred key for remove controls.
    pub id: String,
    /// Name captured when the product was added.
    pub name: String,
    /// Image captured when the product was added.
    pub image_url: String,
    /// Formatted unit price.
    pub unit_price: String,
    /// Units of this product in the cart.
    pub quantity: u32,
    /// `"<unit price> x <quantity>"`.
    pub price_label: String,
}

/// Everything the cart panel and badges display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    /// Rows in insertion order.
    pub lines: Vec<CartLineView>,
    /// Show the empty state instead of rows.
    pub is_empty: bool,
    /// Fixed empty-state text.
    pub empty_message: &'static str,
    /// Sum of quantities, shown on both count badges.
    pub total_quantity: u64,
    /// Formatted total price.
    pub total_price: String,
}

impl CartView {
    /// Project the cart into a view model.
    #[must_use]
    pub fn project(cart: &Cart) -> Self {
        let summary = cart.summary();
        let lines = cart
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let unit_price = line.unit_price.display();
                CartLineView {
                    index,
                    id: line.id.to_string(),
                    name: line.name.clone(),
                    image_url: line.image_url.clone(),
                    price_label: format!("{unit_price} x {}", line.quantity),
                    unit_price,
                    quantity: line.quantity,
                }
            })
            .collect();

        Self {
            lines,
            is_empty: cart.is_empty(),
            empty_message: EMPTY_CART_MESSAGE,
            total_quantity: summary.total_quantity,
            total_price: summary.total_price.display(),
        }
    }
}
