//! Per-request visitor widget state.
//!
//! Each request rebuilds the visitor's [`Storefront`] from three sources:
//! the durable `cart`/`theme` cookies, the session-held [`VisitorSession`],
//! and the browser's color-scheme client hint. Handlers run one widget
//! operation and then [`Visitor::commit`] the result.

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderMap, HeaderName, HeaderValue,
        header::SET_COOKIE,
        request::Parts,
    },
    response::AppendHeaders,
};
use technest_core::{Storefront, StorefrontView, Theme};
use tower_sessions::Session;

use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::models::{VisitorSession, session_keys};
use crate::storage::CookieStore;

/// Client hint carrying the browser's light/dark preference.
pub const COLOR_SCHEME_HINT: &str = "sec-ch-prefers-color-scheme";

/// `Set-Cookie` headers produced by a committed visitor.
pub type CookieHeaders = AppendHeaders<Vec<(HeaderName, HeaderValue)>>;

/// Read the color-scheme client hint.
///
/// The hint is a structured-header string, usually quoted (`"dark"`).
#[must_use]
pub fn color_scheme_hint(headers: &HeaderMap) -> Option<bool> {
    let raw = headers.get(COLOR_SCHEME_HINT)?.to_str().ok()?;
    match raw.trim().trim_matches('"') {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}

/// The current visitor's widgets, loaded for one request.
pub struct Visitor {
    storefront: Storefront<CookieStore>,
    prefers_dark: Option<bool>,
    session: Session,
}

impl Visitor {
    /// The visitor's widget controller.
    pub const fn storefront(&mut self) -> &mut Storefront<CookieStore> {
        &mut self.storefront
    }

    /// The browser reported a new color scheme.
    ///
    /// Returns the theme now in effect if it changed what the page shows.
    pub const fn set_color_scheme(&mut self, prefers_dark: bool) -> Option<Theme> {
        self.prefers_dark = Some(prefers_dark);
        self.storefront.host_preference_changed(prefers_dark)
    }

    /// Save session state and return the view plus cookie updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Session`] if the session store rejects the write.
    pub async fn commit(
        self,
        config: &StorefrontConfig,
    ) -> Result<(StorefrontView, CookieHeaders), AppError> {
        let view = self.storefront.view();
        let (store, ui) = self.storefront.into_parts();

        let record = VisitorSession {
            ui,
            prefers_dark: self.prefers_dark,
        };
        self.session.insert(session_keys::VISITOR, record).await?;

        let cookies = store
            .set_cookie_headers(config)
            .into_iter()
            .map(|value| (SET_COOKIE, value))
            .collect();

        Ok((view, AppendHeaders(cookies)))
    }
}

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::Internal(message.to_string()))?;

        let record = session
            .get::<VisitorSession>(session_keys::VISITOR)
            .await?
            .unwrap_or_default();

        let prefers_dark = color_scheme_hint(&parts.headers).or(record.prefers_dark);
        let store = CookieStore::from_headers(&parts.headers);
        let storefront = Storefront::restore(store, record.ui, prefers_dark.unwrap_or(false));

        Ok(Self {
            storefront,
            prefers_dark,
            session,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn hint(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COLOR_SCHEME_HINT, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_color_scheme_hint() {
        assert_eq!(color_scheme_hint(&hint("\"dark\"")), Some(true));
        assert_eq!(color_scheme_hint(&hint("light")), Some(false));
        assert_eq!(color_scheme_hint(&hint("\"no-preference\"")), None);
        assert_eq!(color_scheme_hint(&HeaderMap::new()), None);
    }
}
