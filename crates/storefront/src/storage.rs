//! Cookie-backed durable store.
//!
//! The visitor's `cart` and `theme` entries live in their own cookies so they
//! survive across sessions. Values are percent-encoded; each entry must fit in
//! a single cookie.

use std::collections::{BTreeMap, HashMap};

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use technest_core::store::keys;
use technest_core::{KeyValueStore, StoreError};

use crate::config::StorefrontConfig;

/// Largest `name=value` pair a browser is guaranteed to keep.
pub const COOKIE_QUOTA: usize = 4096;

/// Cookies this store reads and writes.
const DURABLE_KEYS: [&str; 2] = [keys::CART, keys::THEME];

/// Durable entries read from the request's cookies, plus pending writes.
#[derive(Debug, Clone, Default)]
pub struct CookieStore {
    entries: HashMap<String, String>,
    pending: BTreeMap<String, String>,
}

impl CookieStore {
    /// Read the durable entries out of the request's `Cookie` headers.
    ///
    /// Unknown cookies are skipped. A value that does not decode is dropped
    /// as if it were never stored.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut entries = HashMap::new();

        for header in headers.get_all(COOKIE) {
            let Ok(header) = header.to_str() else {
                continue;
            };
            for pair in header.split(';') {
                let Some((name, raw)) = pair.trim().split_once('=') else {
                    continue;
                };
                if !DURABLE_KEYS.contains(&name) {
                    continue;
                }
                match urlencoding::decode(raw) {
                    Ok(value) => {
                        entries.insert(name.to_owned(), value.into_owned());
                    }
                    Err(e) => {
                        tracing::debug!(cookie = name, error = %e, "Dropping undecodable cookie");
                    }
                }
            }
        }

        Self {
            entries,
            pending: BTreeMap::new(),
        }
    }

    /// Whether any entry was saved since the store was read.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    /// `Set-Cookie` values for every entry saved since the store was read.
    #[must_use]
    pub fn set_cookie_headers(&self, config: &StorefrontConfig) -> Vec<HeaderValue> {
        let max_age = config.cookie_max_age_seconds();
        let secure = if config.is_secure() { "; Secure" } else { "" };

        self.pending
            .iter()
            .filter_map(|(name, encoded)| {
                let cookie = format!(
                    "{name}={encoded}; Path=/; Max-Age={max_age}; SameSite=Lax; HttpOnly{secure}"
                );
                HeaderValue::from_str(&cookie)
                    .inspect_err(|e| {
                        tracing::error!(cookie = %name, error = %e, "Invalid cookie header");
                    })
                    .ok()
            })
            .collect()
    }
}

impl KeyValueStore for CookieStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let encoded = urlencoding::encode(value).into_owned();
        let size = key.len() + 1 + encoded.len();
        if size > COOKIE_QUOTA {
            return Err(StoreError::QuotaExceeded {
                key: key.to_owned(),
                size,
                limit: COOKIE_QUOTA,
            });
        }

        self.entries.insert(key.to_owned(), value.to_owned());
        self.pending.insert(key.to_owned(), encoded);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_reads_known_cookies() {
        let store = CookieStore::from_headers(&headers(
            "tn_session=abc; theme=dark; cart=%5B%7B%22id%22%3A%22a%22%7D%5D",
        ));
        assert_eq!(store.load(keys::THEME).as_deref(), Some("dark"));
        assert_eq!(store.load(keys::CART).as_deref(), Some(r#"[{"id":"a"}]"#));
        assert_eq!(store.load("tn_session"), None);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_save_emits_set_cookie() {
        let mut store = CookieStore::default();
        store.save(keys::CART, r#"[{"id":"a b"}]"#).unwrap();
        assert_eq!(store.load(keys::CART).as_deref(), Some(r#"[{"id":"a b"}]"#));

        let config = StorefrontConfig::for_base_url("http://localhost:3000");
        let cookies = store.set_cookie_headers(&config);
        assert_eq!(cookies.len(), 1);
        let cookie = cookies.first().unwrap().to_str().unwrap();
        assert!(cookie.starts_with("cart=%5B%7B%22id%22%3A%22a%20b%22%7D%5D;"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_secure_cookie_over_https() {
        let mut store = CookieStore::default();
        store.save(keys::THEME, "light").unwrap();
        let config = StorefrontConfig::for_base_url("https://technest.vn");
        let cookies = store.set_cookie_headers(&config);
        assert!(cookies.first().unwrap().to_str().unwrap().ends_with("; Secure"));
    }

    #[test]
    fn test_written_value_reads_back_through_headers() {
        let mut store = CookieStore::default();
        let json = r#"[{"id":"ip15","name":"Điện thoại; mới","price":1,"image":"/x","quantity":2}]"#;
        store.save(keys::CART, json).unwrap();

        let config = StorefrontConfig::for_base_url("http://localhost:3000");
        let set_cookie = store.set_cookie_headers(&config);
        let pair = set_cookie
            .first()
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_owned();

        let reread = CookieStore::from_headers(&headers(&pair));
        assert_eq!(reread.load(keys::CART).as_deref(), Some(json));
    }

    #[test]
    fn test_oversize_value_is_rejected() {
        let mut store = CookieStore::from_headers(&headers("theme=dark"));
        let err = store.save(keys::CART, &"x".repeat(COOKIE_QUOTA)).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { limit: COOKIE_QUOTA, .. }));
        assert!(!store.is_dirty());
        assert_eq!(store.load(keys::CART), None);
    }
}
