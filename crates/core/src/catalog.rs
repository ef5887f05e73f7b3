//! The fixed product catalog.
//!
//! The shop sells a handful of e-books, meal plans, and consultations. The
//! list is built once on first access and never mutated afterwards.

use std::sync::LazyLock;

use crate::types::{Price, ProductId};

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: &'static str,
    pub price: Price,
    /// Path of the cover image under `/static`.
    pub image_url: &'static str,
}

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        Product {
            id: ProductId::new(1),
            name: "E-Book: Break Up With Sugar",
            price: Price::from_minor(2000),
            image_url: "/static/images/ebook_cover1.jpg",
        },
        Product {
            id: ProductId::new(2),
            name: "E-Book: 12 Affirmations",
            price: Price::ZERO,
            image_url: "/static/images/ebook_cover2.jpg",
        },
        Product {
            id: ProductId::new(3),
            name: "Meal Plan 1200 kcal - Thermomix",
            price: Price::from_minor(4000),
            image_url: "/static/images/ebook_cover3.png",
        },
        Product {
            id: ProductId::new(4),
            name: "Diagnostic Consultation",
            price: Price::from_minor(26000),
            image_url: "/static/images/consultation_diagnostic.jpg",
        },
        Product {
            id: ProductId::new(5),
            name: "Follow-up Consultation",
            price: Price::from_minor(22000),
            image_url: "/static/images/consultation_followup.jpg",
        },
    ]
});

/// All products, in display order.
#[must_use]
pub fn catalog() -> &'static [Product] {
    &CATALOG
}

/// Look up a product by ID.
#[must_use]
pub fn find_product(id: ProductId) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id == id)
}
