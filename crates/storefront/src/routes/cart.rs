//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every handler answers with out-of-band swaps of the cart counts, the cart
//! panel and the toast region; the triggering element swaps nothing itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use technest_core::{AddOutcome, AddToCartRequest, ProductId, StorefrontView};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;
use crate::visitor::Visitor;

/// HTMX event fired after the cart contents change.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart counts, panel and toast as out-of-band fragments (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/widgets.html")]
pub struct WidgetsTemplate {
    pub view: StorefrontView,
    pub oob: bool,
}

/// Commit the visitor and render every widget out of band.
pub(crate) async fn render_widgets(
    state: &AppState,
    visitor: Visitor,
    trigger: Option<&'static str>,
) -> Result<Response> {
    let (view, cookies) = visitor.commit(state.config()).await?;
    let widgets = WidgetsTemplate { view, oob: true };

    Ok(match trigger {
        Some(event) => (cookies, AppendHeaders([("HX-Trigger", event)]), widgets).into_response(),
        None => (cookies, widgets).into_response(),
    })
}

/// Add to cart form data.
///
/// Every field is optional so that incomplete triggers reach the widget and
/// produce the failure toast rather than a form rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartForm {
    pub product: Option<String>,
    pub price: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl From<AddToCartForm> for AddToCartRequest {
    fn from(form: AddToCartForm) -> Self {
        Self {
            product_id: form.product,
            unit_price: form.price,
            name: form.name,
            image_url: form.image,
        }
    }
}

/// Remove from cart form data.
///
/// `product` is the stable key; `index` is the position from the latest
/// render and is only used when no product is given.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product: Option<String>,
    pub index: Option<usize>,
}

/// Key press form data.
#[derive(Debug, Deserialize)]
pub struct KeyForm {
    pub key: String,
}

/// Add item to cart (HTMX).
#[instrument(skip(state, visitor))]
pub async fn add(
    State(state): State<AppState>,
    mut visitor: Visitor,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let request = AddToCartRequest::from(form);

    let trigger = match visitor.storefront().add_to_cart(&request, state.catalog()) {
        Ok(outcome) => {
            let product_id = request.product_id.as_deref().unwrap_or_default();
            let message = match outcome {
                AddOutcome::Inserted => "Added to cart",
                AddOutcome::Incremented { .. } => "Incremented cart line",
            };
            add_breadcrumb("cart", message, Some(&[("product_id", product_id)]));
            Some(CART_UPDATED_EVENT)
        }
        Err(_) => None,
    };

    render_widgets(&state, visitor, trigger).await
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(state, visitor))]
pub async fn remove(
    State(state): State<AppState>,
    mut visitor: Visitor,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let removed = match (form.product.as_deref(), form.index) {
        (Some(raw), _) => {
            let id = ProductId::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))?;
            visitor.storefront().remove_line(&id)
        }
        (None, Some(index)) => {
            let len = visitor.storefront().cart().cart().len();
            if index >= len {
                return Err(AppError::BadRequest(format!(
                    "cart index {index} out of range"
                )));
            }
            visitor.storefront().remove_at(index)
        }
        (None, None) => {
            return Err(AppError::BadRequest("missing product".to_string()));
        }
    };

    if removed.is_none() {
        tracing::debug!("Remove requested for a line that is not in the cart");
    }

    let trigger = removed.map(|_| CART_UPDATED_EVENT);
    render_widgets(&state, visitor, trigger).await
}

/// Open the cart panel (HTMX).
#[instrument(skip(state, visitor))]
pub async fn open(State(state): State<AppState>, mut visitor: Visitor) -> Result<Response> {
    visitor.storefront().open_cart();
    render_widgets(&state, visitor, None).await
}

/// Close the cart panel (HTMX).
#[instrument(skip(state, visitor))]
pub async fn close(State(state): State<AppState>, mut visitor: Visitor) -> Result<Response> {
    visitor.storefront().close_cart();
    render_widgets(&state, visitor, None).await
}

/// Forward a key press to the cart panel (HTMX).
#[instrument(skip(state, visitor))]
pub async fn keydown(
    State(state): State<AppState>,
    mut visitor: Visitor,
    Form(form): Form<KeyForm>,
) -> Result<Response> {
    visitor.storefront().key_pressed(&form.key);
    render_widgets(&state, visitor, None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_maps_to_request() {
        let form = AddToCartForm {
            product: Some("airpods-pro-2".to_string()),
            price: Some("5990000".to_string()),
            ..AddToCartForm::default()
        };
        let request = AddToCartRequest::from(form);
        assert_eq!(request.product_id.as_deref(), Some("airpods-pro-2"));
        assert_eq!(request.unit_price.as_deref(), Some("5990000"));
        assert!(request.name.is_none());
        assert!(request.image_url.is_none());
    }
}
