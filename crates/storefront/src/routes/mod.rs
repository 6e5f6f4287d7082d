//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /health                  - Health check
//!
//! # Products
//! GET  /products?filter=<slug>  - Filter bar and product grid (fragment)
//!
//! # Cart (HTMX, out-of-band widget swaps)
//! POST /cart/add                - Add to cart (product, price, name?, image?)
//! POST /cart/remove             - Remove a line (product, or index)
//! POST /cart/open               - Open the cart panel
//! POST /cart/close              - Close the cart panel
//! POST /cart/keydown            - Key press while the panel is open
//!
//! # Toast
//! POST /toast/{ticket}/dismiss  - Scheduled toast hide
//!
//! # Theme
//! POST /theme/toggle            - Flip the theme (HX-Refresh)
//! POST /theme/system            - Browser color scheme changed
//!
//! # Newsletter
//! POST /newsletter              - Newsletter signup
//! ```

pub mod cart;
pub mod home;
pub mod newsletter;
pub mod products;
pub mod theme;
pub mod toast;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/open", post(cart::open))
        .route("/close", post(cart::close))
        .route("/keydown", post(cart::keydown))
}

/// Create the theme routes router.
pub fn theme_routes() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(theme::toggle))
        .route("/system", post(theme::system))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product grid fragment
        .route("/products", get(products::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Toast hides
        .route("/toast/{ticket}/dismiss", post(toast::dismiss))
        // Theme routes
        .nest("/theme", theme_routes())
        // Newsletter
        .route("/newsletter", post(newsletter::subscribe))
}
