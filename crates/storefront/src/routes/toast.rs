//! Toast hide requests.
//!
//! The toast markup schedules its own hide with a delayed HTMX request that
//! echoes its ticket. Only the ticket of the toast currently shown hides
//! anything; a stale one gets `204 No Content` and HTMX leaves the page alone.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use technest_core::{HideTicket, StorefrontView};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::visitor::Visitor;

/// Toast region fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/toast.html")]
pub struct ToastTemplate {
    pub view: StorefrontView,
    pub oob: bool,
}

/// Run a scheduled toast hide.
#[instrument(skip(state, visitor))]
pub async fn dismiss(
    State(state): State<AppState>,
    Path(ticket): Path<u64>,
    mut visitor: Visitor,
) -> Result<Response> {
    if !visitor.storefront().expire_toast(HideTicket::new(ticket)) {
        tracing::debug!(ticket, "Ignoring stale toast ticket");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let (view, cookies) = visitor.commit(state.config()).await?;
    Ok((cookies, ToastTemplate { view, oob: false }).into_response())
}
