//! Static page content: the product lineup shown on the storefront.
//!
//! Products are compiled in; the page has no product backend.

use technest_core::{Catalog, Category, Price, Product, ProductId};

/// A product as written in the lineup table below.
struct Entry {
    id: &'static str,
    name: &'static str,
    price: u64,
    category: Category,
    featured: bool,
}

const LINEUP: &[Entry] = &[
    Entry {
        id: "iphone-15-pro-max",
        name: "iPhone 15 Pro Max",
        price: 34_990_000,
        category: Category::Phone,
        featured: true,
    },
    Entry {
        id: "galaxy-s24-ultra",
        name: "Samsung Galaxy S24 Ultra",
        price: 31_990_000,
        category: Category::Phone,
        featured: false,
    },
    Entry {
        id: "pixel-8-pro",
        name: "Google Pixel 8 Pro",
        price: 22_490_000,
        category: Category::Phone,
        featured: false,
    },
    Entry {
        id: "macbook-air-m3",
        name: "MacBook Air M3 13 inch",
        price: 27_990_000,
        category: Category::Laptop,
        featured: false,
    },
    Entry {
        id: "dell-xps-14",
        name: "Dell XPS 14",
        price: 45_990_000,
        category: Category::Laptop,
        featured: false,
    },
    Entry {
        id: "ipad-pro-m4",
        name: "iPad Pro M4 11 inch",
        price: 28_990_000,
        category: Category::Tablet,
        featured: false,
    },
    Entry {
        id: "galaxy-tab-s9",
        name: "Samsung Galaxy Tab S9",
        price: 19_990_000,
        category: Category::Tablet,
        featured: false,
    },
    Entry {
        id: "airpods-pro-2",
        name: "AirPods Pro 2",
        price: 5_990_000,
        category: Category::Accessory,
        featured: false,
    },
    Entry {
        id: "apple-watch-s9",
        name: "Apple Watch Series 9",
        price: 10_490_000,
        category: Category::Accessory,
        featured: false,
    },
];

/// Build the catalog the storefront renders.
///
/// Entries with an id that does not parse are skipped with an error log.
#[must_use]
pub fn default_catalog() -> Catalog {
    let products = LINEUP
        .iter()
        .filter_map(|entry| match ProductId::parse(entry.id) {
            Ok(id) => Some(Product {
                image_url: format!("/static/images/products/{}.webp", entry.id),
                id,
                name: entry.name.to_owned(),
                price: Price::new(entry.price),
                category: entry.category,
                featured: entry.featured,
            }),
            Err(e) => {
                tracing::error!(id = entry.id, error = %e, "Skipping catalog entry");
                None
            }
        })
        .collect();

    Catalog::new(products)
}
