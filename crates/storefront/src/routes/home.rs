//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use technest_core::{CategoryFilter, StorefrontView};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::routes::products::{ProductCardView, ProductsSection};
use crate::state::AppState;
use crate::visitor::Visitor;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Widget state (theme, cart, panel, toast).
    pub view: StorefrontView,
    /// Featured product for the hero section.
    pub hero: Option<ProductCardView>,
    /// Filter bar and product grid.
    pub section: ProductsSection,
    /// Newsletter field value.
    pub email: String,
    /// Widgets render in place on the full page.
    pub oob: bool,
}

/// Display the home page.
#[instrument(skip(state, visitor))]
pub async fn home(State(state): State<AppState>, visitor: Visitor) -> Result<Response> {
    let catalog = state.catalog();
    let (view, cookies) = visitor.commit(state.config()).await?;

    let page = HomeTemplate {
        view,
        hero: catalog.featured().map(ProductCardView::from),
        section: ProductsSection::build(catalog, &CategoryFilter::All),
        email: String::new(),
        oob: false,
    };

    Ok((cookies, page).into_response())
}
