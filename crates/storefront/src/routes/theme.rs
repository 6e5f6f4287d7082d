//! Theme route handlers.
//!
//! The theme is applied server-side as `data-theme` on the root element, so a
//! change that affects the page asks HTMX for a full refresh.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use technest_core::Theme;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::visitor::Visitor;

const REFRESH: AppendHeaders<[(&str, &str); 1]> = AppendHeaders([("HX-Refresh", "true")]);

/// Color scheme report form data.
#[derive(Debug, Deserialize)]
pub struct SchemeForm {
    pub scheme: String,
}

/// Flip and persist the theme (HTMX).
#[instrument(skip(state, visitor))]
pub async fn toggle(State(state): State<AppState>, mut visitor: Visitor) -> Result<Response> {
    let theme = visitor.storefront().toggle_theme();
    tracing::info!(theme = %theme, "Theme toggled");

    let (_, cookies) = visitor.commit(state.config()).await?;
    Ok((cookies, REFRESH).into_response())
}

/// The browser's light/dark preference changed (HTMX).
///
/// Refreshes the page only when no stored choice overrides the preference.
#[instrument(skip(state, visitor))]
pub async fn system(
    State(state): State<AppState>,
    mut visitor: Visitor,
    Form(form): Form<SchemeForm>,
) -> Result<Response> {
    let scheme = form
        .scheme
        .trim()
        .parse::<Theme>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let applied = visitor.set_color_scheme(scheme.is_dark());
    let (_, cookies) = visitor.commit(state.config()).await?;

    Ok(match applied {
        Some(theme) => {
            tracing::debug!(theme = %theme, "Following host color scheme");
            (cookies, REFRESH).into_response()
        }
        None => (cookies, StatusCode::NO_CONTENT).into_response(),
    })
}
