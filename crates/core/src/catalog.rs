//! Product catalog and category filter.
//!
//! The catalog is the structured product information the page is built from.
//! The add-to-cart flow uses it as the middle step of its detail fallback
//! chain: details supplied with the trigger, then the catalog entry, then a
//! generic placeholder.

use crate::types::{Price, ProductId};

/// Image shown for products with no known picture.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/100";

/// Filter slug that matches every product.
pub const ALL_FILTER: &str = "all";

/// Product category, used by the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Phone,
    Laptop,
    Tablet,
    Accessory,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Phone, Self::Laptop, Self::Tablet, Self::Accessory];

    /// Slug used in filter links and `data-category` attributes.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Laptop => "laptop",
            Self::Tablet => "tablet",
            Self::Accessory => "accessory",
        }
    }

    /// Label shown on the filter button.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Phone => "Điện thoại",
            Self::Laptop => "Laptop",
            Self::Tablet => "Máy tính bảng",
            Self::Accessory => "Phụ kiện",
        }
    }
}

/// Active product filter.
///
/// Any slug other than `all` is compared verbatim against category slugs, so
/// an unknown slug simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Slug(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_FILTER {
            Self::All
        } else {
            Self::Slug(raw.to_owned())
        }
    }

    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Slug(slug) => slug == category.slug(),
        }
    }

    /// The slug this filter was parsed from.
    #[must_use]
    pub fn as_slug(&self) -> &str {
        match self {
            Self::All => ALL_FILTER,
            Self::Slug(slug) => slug,
        }
    }
}

/// A product shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_url: String,
    pub category: Category,
    /// Shown in the hero section.
    pub featured: bool,
}

/// Ordered product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

/// Name and image resolved for an add-to-cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDetails {
    pub name: String,
    pub image_url: String,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// The hero product, if any is marked featured.
    #[must_use]
    pub fn featured(&self) -> Option<&Product> {
        self.products.iter().find(|product| product.featured)
    }

    /// Products matching `filter`, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a CategoryFilter) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| filter.matches(product.category))
    }

    /// Resolve display details for `id`.
    ///
    /// Non-blank supplied values win, then the catalog entry, then the
    /// placeholder (the id itself as the name).
    #[must_use]
    pub fn resolve_details(
        &self,
        id: &ProductId,
        name: Option<&str>,
        image_url: Option<&str>,
    ) -> ResolvedDetails {
        let non_blank = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };
        let entry = self.find(id);

        ResolvedDetails {
            name: non_blank(name)
                .or_else(|| entry.map(|product| product.name.clone()))
                .unwrap_or_else(|| id.to_string()),
            image_url: non_blank(image_url)
                .or_else(|| entry.map(|product| product.image_url.clone()))
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, category: Category, featured: bool) -> Product {
        Product {
            id: ProductId::parse(id).unwrap(),
            name: format!("Name of {id}"),
            price: Price::new(1_000),
            image_url: format!("/img/{id}.webp"),
            category,
            featured,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("ip15", Category::Phone, true),
            product("mba", Category::Laptop, false),
            product("s24", Category::Phone, false),
            product("case", Category::Accessory, false),
        ])
    }

    fn ids<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<&'a str> {
        products.map(|product| product.id.as_str()).collect()
    }

    #[test]
    fn test_filter_all() {
        let catalog = catalog();
        let filter = CategoryFilter::parse("all");
        assert_eq!(ids(catalog.filter(&filter)), ["ip15", "mba", "s24", "case"]);
    }

    #[test]
    fn test_filter_by_slug() {
        let catalog = catalog();
        let filter = CategoryFilter::parse("phone");
        assert_eq!(ids(catalog.filter(&filter)), ["ip15", "s24"]);
    }

    #[test]
    fn test_filter_unknown_matches_nothing() {
        let catalog = catalog();
        let filter = CategoryFilter::parse("drones");
        assert_eq!(catalog.filter(&filter).count(), 0);
        assert_eq!(filter.as_slug(), "drones");
    }

    #[test]
    fn test_filter_blank_is_all() {
        assert_eq!(CategoryFilter::parse("  "), CategoryFilter::All);
    }

    #[test]
    fn test_featured() {
        assert_eq!(catalog().featured().unwrap().id.as_str(), "ip15");
        assert!(Catalog::default().featured().is_none());
    }

    #[test]
    fn test_resolve_prefers_supplied_details() {
        let catalog = catalog();
        let id = ProductId::parse("mba").unwrap();
        let details = catalog.resolve_details(&id, Some("MacBook Air 13"), Some("/x.png"));
        assert_eq!(details.name, "MacBook Air 13");
        assert_eq!(details.image_url, "/x.png");
    }

    #[test]
    fn test_resolve_falls_back_to_catalog() {
        let catalog = catalog();
        let id = ProductId::parse("mba").unwrap();
        let details = catalog.resolve_details(&id, Some("  "), None);
        assert_eq!(details.name, "Name of mba");
        assert_eq!(details.image_url, "/img/mba.webp");
    }

    #[test]
    fn test_resolve_falls_back_to_placeholder() {
        let catalog = catalog();
        let id = ProductId::parse("mystery-box").unwrap();
        let details = catalog.resolve_details(&id, None, None);
        assert_eq!(details.name, "mystery-box");
        assert_eq!(details.image_url, PLACEHOLDER_IMAGE);
    }
}
