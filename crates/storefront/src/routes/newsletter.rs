//! Newsletter subscription route handler.
//!
//! The signup form is a front-end stub: the address is validated and
//! acknowledged with a toast, and nothing is stored or sent anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use technest_core::StorefrontView;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::visitor::Visitor;

/// Newsletter subscription form data.
#[derive(Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Form fragment plus out-of-band widgets (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/newsletter.html")]
pub struct NewsletterTemplate {
    pub view: StorefrontView,
    pub oob: bool,
    /// Value to keep in the email field.
    pub email: String,
}

/// Subscribe to newsletter (HTMX).
///
/// A valid address clears the form; an invalid one keeps what was typed.
#[instrument(skip(state, visitor, form))]
pub async fn subscribe(
    State(state): State<AppState>,
    mut visitor: Visitor,
    Form(form): Form<SubscribeForm>,
) -> Result<Response> {
    let email = match visitor.storefront().subscribe_newsletter(&form.email) {
        Ok(_) => String::new(),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected newsletter address");
            form.email.trim().to_string()
        }
    };

    let (view, cookies) = visitor.commit(state.config()).await?;
    Ok((
        cookies,
        NewsletterTemplate {
            view,
            oob: true,
            email,
        },
    )
        .into_response())
}
