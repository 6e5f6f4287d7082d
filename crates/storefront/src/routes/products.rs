//! Product grid and category filter.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use technest_core::{Catalog, Category, CategoryFilter, Product, catalog::ALL_FILTER};
use tracing::instrument;

use crate::state::AppState;

/// Label of the "show everything" filter button.
pub const ALL_LABEL: &str = "Tất cả";

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price_label: String,
    /// Whole-VND amount posted back by the add-to-cart form.
    pub price_amount: u64,
    pub image_url: String,
    pub category: &'static str,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price_label: product.price.display(),
            price_amount: product.price.amount(),
            image_url: product.image_url.clone(),
            category: product.category.slug(),
        }
    }
}

/// One button of the filter bar.
#[derive(Clone)]
pub struct FilterButton {
    pub slug: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Filter bar plus the products it lets through.
#[derive(Clone)]
pub struct ProductsSection {
    pub filters: Vec<FilterButton>,
    pub products: Vec<ProductCardView>,
}

impl ProductsSection {
    /// Build the section for `filter`. An unknown slug shows an empty grid
    /// with no active button.
    #[must_use]
    pub fn build(catalog: &Catalog, filter: &CategoryFilter) -> Self {
        let active = filter.as_slug();
        let filters = std::iter::once((ALL_FILTER, ALL_LABEL))
            .chain(Category::ALL.map(|category| (category.slug(), category.label())))
            .map(|(slug, label)| FilterButton {
                slug,
                label,
                active: slug == active,
            })
            .collect();

        Self {
            filters,
            products: catalog.filter(filter).map(ProductCardView::from).collect(),
        }
    }
}

/// Filter query parameters.
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub filter: Option<String>,
}

/// Product section fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/products.html")]
pub struct ProductsTemplate {
    pub section: ProductsSection,
}

/// Display the product section for a category filter (HTMX).
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> impl IntoResponse {
    let filter = CategoryFilter::parse(query.filter.as_deref().unwrap_or_default());
    ProductsTemplate {
        section: ProductsSection::build(state.catalog(), &filter),
    }
}
