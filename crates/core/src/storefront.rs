//! The storefront controller.
//!
//! [`Storefront`] is the single owner of one visitor's widget state: the
//! durable store, the cart manager, the theme, the cart panel and the toast.
//! Hosts rebuild it for each interaction with [`Storefront::restore`], call one
//! operation, render [`Storefront::view`] and hand back the store and
//! [`UiState`] for safekeeping.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{AddOutcome, CartLine, CartManager, CartSummary, NewCartItem};
use crate::catalog::Catalog;
use crate::notify::{HideTicket, Notifier, TOAST_DURATION, Toast, ToastKind};
use crate::panel::{PanelEffects, PanelState};
use crate::store::KeyValueStore;
use crate::theme::ThemeState;
use crate::types::{Email, EmailError, IdError, Price, ProductId, Theme};
use crate::view::CartView;

/// Toast after a successful add.
pub const ADDED_TO_CART_MESSAGE: &str = "Đã thêm vào giỏ hàng!";
/// Toast after an add-to-cart with unusable trigger data.
pub const ADD_FAILED_MESSAGE: &str = "Không thể thêm sản phẩm vào giỏ hàng";
/// Toast after a newsletter signup.
pub const SUBSCRIBED_MESSAGE: &str = "Đăng ký thành công! Cảm ơn bạn.";
/// Toast after a newsletter signup with a bad address.
pub const INVALID_EMAIL_MESSAGE: &str = "Vui lòng nhập email hợp lệ.";

/// Ephemeral per-tab UI state. Not durable; the host keeps it for the
/// browsing session only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub panel: PanelState,
    pub notifier: Notifier,
}

/// Raw data attached to an "add to cart" trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: Option<String>,
    pub unit_price: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

/// Why an add-to-cart trigger was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddToCartError {
    #[error("add to cart trigger has no product id")]
    MissingProductId,

    #[error("invalid product id: {0}")]
    InvalidProductId(#[from] IdError),

    #[error("add to cart trigger for '{0}' has no price")]
    MissingPrice(ProductId),

    #[error("add to cart trigger for '{id}' has invalid price '{raw}'")]
    InvalidPrice { id: ProductId, raw: String },
}

/// Toast as the renderer needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub message: String,
    pub is_error: bool,
    /// Hide ticket, echoed back by the scheduled dismiss.
    pub ticket: u64,
    /// Delay before the dismiss fires.
    pub hide_after_ms: u64,
}

impl From<&Toast> for ToastView {
    fn from(toast: &Toast) -> Self {
        Self {
            message: toast.message.clone(),
            is_error: toast.kind == ToastKind::Error,
            ticket: toast.ticket.get(),
            hide_after_ms: u64::try_from(TOAST_DURATION.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Everything the page's widgets display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontView {
    pub cart: CartView,
    pub panel: PanelEffects,
    /// Theme in effect.
    pub theme: Theme,
    /// The theme comes from a stored choice rather than the host preference.
    pub theme_is_explicit: bool,
    /// Toast on screen, if any.
    pub toast: Option<ToastView>,
}

/// Owner of one visitor's widget state.
#[derive(Debug)]
pub struct Storefront<S> {
    store: S,
    cart: CartManager,
    theme: ThemeState,
    ui: UiState,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Start with fresh UI state.
    pub fn new(store: S, host_prefers_dark: bool) -> Self {
        Self::restore(store, UiState::default(), host_prefers_dark)
    }

    /// Rebuild from a store and saved UI state.
    pub fn restore(store: S, ui: UiState, host_prefers_dark: bool) -> Self {
        let cart = CartManager::load(&store);
        let theme = ThemeState::load(&store, host_prefers_dark);
        Self {
            store,
            cart,
            theme,
            ui,
        }
    }

    /// Handle an "add to cart" trigger.
    ///
    /// Valid triggers add one unit and show the success toast. Triggers with a
    /// missing product id or an unusable price leave the cart untouched and
    /// show the failure toast instead.
    ///
    /// # Errors
    ///
    /// Returns [`AddToCartError`] describing the rejected trigger data.
    pub fn add_to_cart(
        &mut self,
        request: &AddToCartRequest,
        catalog: &Catalog,
    ) -> Result<AddOutcome, AddToCartError> {
        match Self::validate(request, catalog) {
            Ok(item) => {
                let outcome = self.cart.add_item(&mut self.store, item);
                self.ui.notifier.show(ADDED_TO_CART_MESSAGE, ToastKind::Success);
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected add to cart trigger");
                self.ui.notifier.show(ADD_FAILED_MESSAGE, ToastKind::Error);
                Err(e)
            }
        }
    }

    fn validate(
        request: &AddToCartRequest,
        catalog: &Catalog,
    ) -> Result<NewCartItem, AddToCartError> {
        let raw_id = request
            .product_id
            .as_deref()
            .ok_or(AddToCartError::MissingProductId)?;
        let id = ProductId::parse(raw_id)?;

        let raw_price = request
            .unit_price
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AddToCartError::MissingPrice(id.clone()))?;
        let unit_price = raw_price
            .parse::<u64>()
            .map(Price::new)
            .map_err(|_| AddToCartError::InvalidPrice {
                id: id.clone(),
                raw: raw_price.to_owned(),
            })?;

        let details =
            catalog.resolve_details(&id, request.name.as_deref(), request.image_url.as_deref());

        Ok(NewCartItem {
            id,
            name: details.name,
            unit_price,
            image_url: details.image_url,
        })
    }

    /// Remove the line for a stable product id.
    pub fn remove_line(&mut self, id: &ProductId) -> Option<CartLine> {
        self.cart.remove_by_id(&mut self.store, id)
    }

    /// Remove the line at a position from the latest render.
    pub fn remove_at(&mut self, index: usize) -> Option<CartLine> {
        self.cart.remove_item(&mut self.store, index)
    }

    /// Returns `true` if the panel state changed.
    pub const fn open_cart(&mut self) -> bool {
        self.ui.panel.open()
    }

    /// Returns `true` if the panel state changed.
    pub const fn close_cart(&mut self) -> bool {
        self.ui.panel.close()
    }

    /// Returns `true` if the key closed the panel.
    pub fn key_pressed(&mut self, key: &str) -> bool {
        self.ui.panel.handle_key(key)
    }

    /// Flip and persist the theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(&mut self.store)
    }

    /// See [`ThemeState::host_preference_changed`].
    pub const fn host_preference_changed(&mut self, prefers_dark: bool) -> Option<Theme> {
        self.theme.host_preference_changed(prefers_dark)
    }

    /// Run a scheduled toast hide. Returns `true` if the toast was hidden.
    pub fn expire_toast(&mut self, ticket: HideTicket) -> bool {
        self.ui.notifier.expire(ticket)
    }

    /// Validate a newsletter address and show the matching toast.
    ///
    /// Nothing is stored or sent anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] if the address is invalid.
    pub fn subscribe_newsletter(&mut self, raw_email: &str) -> Result<Email, EmailError> {
        match Email::parse(raw_email) {
            Ok(email) => {
                tracing::info!(domain = email.domain(), "Newsletter signup");
                self.ui.notifier.show(SUBSCRIBED_MESSAGE, ToastKind::Success);
                Ok(email)
            }
            Err(e) => {
                self.ui.notifier.show(INVALID_EMAIL_MESSAGE, ToastKind::Error);
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    #[must_use]
    pub const fn cart(&self) -> &CartManager {
        &self.cart
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Project all widget state for rendering.
    #[must_use]
    pub fn view(&self) -> StorefrontView {
        StorefrontView {
            cart: self.cart.view(),
            panel: self.ui.panel.effects(),
            theme: self.theme.current(),
            theme_is_explicit: self.theme.is_explicit(),
            toast: self.ui.notifier.current().map(ToastView::from),
        }
    }

    #[must_use]
    pub const fn ui_state(&self) -> &UiState {
        &self.ui
    }

    /// Hand back the store and UI state.
    #[must_use]
    pub fn into_parts(self) -> (S, UiState) {
        (self.store, self.ui)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{Category, PLACEHOLDER_IMAGE, Product};
    use crate::store::{MemoryStore, keys};

    fn catalog() -> Catalog {
        Catalog::new(vec![Product {
            id: ProductId::parse("iphone-15-pro-max").unwrap(),
            name: "iPhone 15 Pro Max".to_string(),
            price: Price::new(34_990_000),
            image_url: "/static/images/products/iphone-15-pro-max.webp".to_string(),
            category: Category::Phone,
            featured: true,
        }])
    }

    fn request(id: &str, price: &str) -> AddToCartRequest {
        AddToCartRequest {
            product_id: Some(id.to_string()),
            unit_price: Some(price.to_string()),
            ..AddToCartRequest::default()
        }
    }

    #[test]
    fn test_add_merges_and_toasts() {
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        let catalog = catalog();

        storefront
            .add_to_cart(&request("iphone-15-pro-max", "34990000"), &catalog)
            .unwrap();
        let outcome = storefront
            .add_to_cart(&request("iphone-15-pro-max", "34990000"), &catalog)
            .unwrap();
        assert_eq!(outcome, AddOutcome::Incremented { quantity: 2 });

        let view = storefront.view();
        assert_eq!(view.cart.lines.len(), 1);
        assert_eq!(view.cart.total_price, "69.980.000₫");
        let toast = view.toast.unwrap();
        assert_eq!(toast.message, ADDED_TO_CART_MESSAGE);
        assert!(!toast.is_error);
        assert_eq!(toast.hide_after_ms, 2500);
    }

    #[test]
    fn test_add_resolves_details_from_catalog_then_placeholder() {
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        let catalog = catalog();

        storefront
            .add_to_cart(&request("iphone-15-pro-max", "1"), &catalog)
            .unwrap();
        storefront
            .add_to_cart(&request("gift-card", "500000"), &catalog)
            .unwrap();

        let lines = storefront.cart().cart().lines();
        assert_eq!(lines.first().unwrap().name, "iPhone 15 Pro Max");
        let gift = lines.get(1).unwrap();
        assert_eq!(gift.name, "gift-card");
        assert_eq!(gift.image_url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_add_without_price_is_rejected() {
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        let mut missing = request("iphone-15-pro-max", "");
        missing.unit_price = None;

        let err = storefront.add_to_cart(&missing, &catalog()).unwrap_err();
        assert!(matches!(err, AddToCartError::MissingPrice(_)));
        assert!(storefront.cart().cart().is_empty());

        let toast = storefront.view().toast.unwrap();
        assert!(toast.is_error);
        assert_eq!(toast.message, ADD_FAILED_MESSAGE);

        let (store, _) = storefront.into_parts();
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_add_with_bad_price_or_id_is_rejected() {
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        let catalog = catalog();

        assert!(matches!(
            storefront.add_to_cart(&request("x", "12abc"), &catalog),
            Err(AddToCartError::InvalidPrice { .. })
        ));
        assert!(matches!(
            storefront.add_to_cart(&request("x", "-5"), &catalog),
            Err(AddToCartError::InvalidPrice { .. })
        ));
        assert!(matches!(
            storefront.add_to_cart(&request("  ", "5"), &catalog),
            Err(AddToCartError::InvalidProductId(IdError::Empty))
        ));
        assert!(matches!(
            storefront.add_to_cart(&AddToCartRequest::default(), &catalog),
            Err(AddToCartError::MissingProductId)
        ));
        assert!(storefront.cart().cart().is_empty());
    }

    #[test]
    fn test_remove_line_by_id() {
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        let catalog = catalog();
        for id in ["a", "b", "c"] {
            storefront.add_to_cart(&request(id, "10"), &catalog).unwrap();
        }

        let removed = storefront.remove_line(&ProductId::parse("b").unwrap()).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        let ids: Vec<_> = storefront
            .view()
            .cart
            .lines
            .into_iter()
            .map(|line| line.id)
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_remove_at_index() {
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        let catalog = catalog();
        for id in ["a", "b", "c"] {
            storefront.add_to_cart(&request(id, "10"), &catalog).unwrap();
        }
        assert_eq!(storefront.remove_at(1).unwrap().id.as_str(), "b");
        assert_eq!(storefront.summary().total_quantity, 2);
    }

    #[test]
    fn test_state_survives_restore() {
        let catalog = catalog();
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        storefront
            .add_to_cart(&request("iphone-15-pro-max", "34990000"), &catalog)
            .unwrap();
        storefront.open_cart();
        storefront.toggle_theme();
        let (store, ui) = storefront.into_parts();
        assert!(store.get(keys::CART).is_some());

        let restored = Storefront::restore(store, ui, false);
        let view = restored.view();
        assert_eq!(view.cart.total_quantity, 1);
        assert!(view.panel.panel_visible);
        assert_eq!(view.theme, Theme::Dark);
        assert!(view.toast.is_some());
    }

    #[test]
    fn test_panel_and_escape() {
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        assert!(!storefront.key_pressed("Escape"));
        assert!(storefront.open_cart());
        assert!(storefront.view().panel.scroll_locked);
        assert!(storefront.key_pressed("Escape"));
        assert!(!storefront.view().panel.overlay_visible);
        assert!(!storefront.close_cart());
    }

    #[test]
    fn test_toast_tickets() {
        let catalog = catalog();
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        storefront.add_to_cart(&request("a", "1"), &catalog).unwrap();
        let first = HideTicket::new(storefront.view().toast.unwrap().ticket);
        storefront.subscribe_newsletter("lan@technest.vn").unwrap();

        assert!(!storefront.expire_toast(first));
        let toast = storefront.view().toast.unwrap();
        assert_eq!(toast.message, SUBSCRIBED_MESSAGE);
        assert!(storefront.expire_toast(HideTicket::new(toast.ticket)));
        assert!(storefront.view().toast.is_none());
    }

    #[test]
    fn test_newsletter_invalid_email() {
        let mut storefront = Storefront::new(MemoryStore::new(), false);
        assert!(storefront.subscribe_newsletter("not-an-email").is_err());
        let toast = storefront.view().toast.unwrap();
        assert!(toast.is_error);
        assert_eq!(toast.message, INVALID_EMAIL_MESSAGE);
    }

    #[test]
    fn test_theme_default_and_override() {
        let mut storefront = Storefront::new(MemoryStore::new(), true);
        assert_eq!(storefront.theme(), Theme::Dark);
        assert!(!storefront.view().theme_is_explicit);
        assert_eq!(storefront.host_preference_changed(false), Some(Theme::Light));

        assert_eq!(storefront.toggle_theme(), Theme::Dark);
        assert!(storefront.view().theme_is_explicit);
        assert_eq!(storefront.host_preference_changed(false), None);
        assert_eq!(storefront.theme(), Theme::Dark);
    }
}
