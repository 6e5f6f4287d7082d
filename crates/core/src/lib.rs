//! TechNest Core - Storefront widget domain library.
//!
//! This crate holds everything the storefront page's interactive widgets do,
//! independent of how they are hosted:
//! - the shopping cart and its state manager
//! - price formatting for the fixed `vi-VN` locale
//! - the light/dark theme choice
//! - the cart side-panel state machine
//! - the toast notifier and its hide tickets
//! - the product catalog and category filter
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no DOM.
//! Durable state goes through the [`store::KeyValueStore`] trait, which the
//! host implements over whatever browser-side storage it has. The
//! [`storefront::Storefront`] controller owns all widget state for one visitor
//! interaction and projects it into plain view models for a renderer.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails and themes
//! - [`store`] - Persistent key-value store adapter
//! - [`cart`] - Cart lines, the cart and the cart state manager
//! - [`view`] - Pure state to view-model projection
//! - [`panel`] - Cart side-panel open/close state
//! - [`notify`] - Toast notifications with cancellable hides
//! - [`theme`] - Explicit vs host-preferred theme
//! - [`catalog`] - Products, categories and the product filter
//! - [`storefront`] - The controller tying the widgets together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod notify;
pub mod panel;
pub mod store;
pub mod storefront;
pub mod theme;
pub mod types;
pub mod view;

pub use cart::{AddOutcome, Cart, CartLine, CartManager, CartSummary, NewCartItem};
pub use catalog::{Catalog, Category, CategoryFilter, Product, ResolvedDetails};
pub use notify::{HideTicket, Notifier, Toast, ToastKind};
pub use panel::{PanelEffects, PanelState};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use storefront::{
    AddToCartError, AddToCartRequest, Storefront, StorefrontView, ToastView, UiState,
};
pub use theme::ThemeState;
pub use types::*;
pub use view::{CartLineView, CartView};
