//! Integration tests for TechNest.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p technest-integration-tests
//! ```
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`;
//! no server or network is needed. [`TestClient`] plays the browser: it keeps
//! the cookies the storefront sets and sends them back on later requests.
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart, cart panel and add-to-cart triggers
//! - `storefront_theme` - Theme toggle and host color scheme
//! - `storefront_toast` - Toast hide tickets and newsletter signup
//! - `storefront_pages` - Pages, fragments and response headers

#![allow(clippy::missing_panics_doc)]

use std::collections::BTreeMap;

use axum::{
    Router,
    body::Body,
    http::{
        HeaderMap, Method, Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
};
use technest_storefront::config::StorefrontConfig;
use technest_storefront::state::AppState;
use tower::ServiceExt;

/// Base URL used by test clients.
pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a single-valued header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Ticket of the toast rendered in the body, if any.
    #[must_use]
    pub fn toast_ticket(&self) -> Option<u64> {
        let start = self.body.find("/toast/")? + "/toast/".len();
        let digits: String = self
            .body
            .get(start..)?
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }
}

/// In-process browser for the storefront router.
pub struct TestClient {
    app: Router,
    cookies: BTreeMap<String, String>,
    color_scheme: Option<&'static str>,
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClient {
    /// A client for a fresh storefront with the default catalog.
    #[must_use]
    pub fn new() -> Self {
        let state = AppState::new(StorefrontConfig::for_base_url(TEST_BASE_URL));
        Self::with_app(technest_storefront::app(state))
    }

    /// A client for an existing router.
    #[must_use]
    pub const fn with_app(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
            color_scheme: None,
        }
    }

    /// Another visitor on the same server, with no cookies.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self::with_app(self.app.clone())
    }

    /// Send the color-scheme client hint on every request.
    pub const fn set_color_scheme(&mut self, scheme: &'static str) {
        self.color_scheme = Some(scheme);
    }

    /// Raw (still percent-encoded) cookie value.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Decoded cookie value.
    #[must_use]
    pub fn decoded_cookie(&self, name: &str) -> Option<String> {
        self.cookie(name)
            .and_then(|raw| urlencoding::decode(raw).ok())
            .map(std::borrow::Cow::into_owned)
    }

    /// Plant a cookie as if an earlier visit had set it.
    pub fn set_cookie(&mut self, name: &str, raw_value: &str) {
        self.cookies.insert(name.to_owned(), raw_value.to_owned());
    }

    /// Forget the session cookie, as a browser does when it is closed.
    pub fn end_browser_session(&mut self) {
        self.cookies
            .remove(technest_storefront::middleware::session::SESSION_COOKIE_NAME);
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(String::new())).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");
        self.send(Method::POST, uri, Some(body)).await
    }

    async fn send(&mut self, method: Method, uri: &str, form: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if !self.cookies.is_empty() {
            let jar = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(COOKIE, jar);
        }
        if let Some(scheme) = self.color_scheme {
            builder = builder.header("sec-ch-prefers-color-scheme", format!("\"{scheme}\""));
        }

        let body = match form {
            Some(form) => {
                builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };

        let request = builder.body(body).expect("valid request");
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        self.store_cookies(&headers);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = String::from_utf8(bytes.to_vec()).expect("utf-8 body");

        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn store_cookies(&mut self, headers: &HeaderMap) {
        for header in headers.get_all(SET_COOKIE) {
            let Ok(header) = header.to_str() else {
                continue;
            };
            let pair = header.split(';').next().unwrap_or_default();
            if let Some((name, value)) = pair.trim().split_once('=') {
                self.cookies.insert(name.to_owned(), value.to_owned());
            }
        }
    }
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
#[must_use]
pub fn count_matches(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Parse the `cart` cookie JSON of `client`.
#[must_use]
pub fn cart_cookie_json(client: &TestClient) -> Option<serde_json::Value> {
    client
        .decoded_cookie(technest_core::store::keys::CART)
        .and_then(|raw| serde_json::from_str(&raw).ok())
}
