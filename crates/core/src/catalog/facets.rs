//! Navigation facet derivation.
//!
//! Facets are the distinct values of a filterable attribute, derived from
//! a record collection while preserving first-seen order. This is a
//! distinct-preserving-order reduction, not a search index.

use std::collections::HashSet;

use super::records::{BlogPost, Faq, Product};

/// A labelled price bucket for the shop sidebar.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PriceRange {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Fixed price buckets offered as shop facets.
pub const PRICE_RANGES: [PriceRange; 4] = [
    PriceRange {
        label: "Under $200",
        min: 0.0,
        max: 200.0,
    },
    PriceRange {
        label: "$200 - $400",
        min: 200.0,
        max: 400.0,
    },
    PriceRange {
        label: "$400 - $600",
        min: 400.0,
        max: 600.0,
    },
    PriceRange {
        label: "Over $600",
        min: 600.0,
        max: 10_000.0,
    },
];

/// Reduce an iterator of values to its distinct elements, first-seen order.
pub fn distinct_preserving_order<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        let value = value.as_ref();
        if seen.insert(value.to_owned()) {
            out.push(value.to_owned());
        }
    }
    out
}

/// Distinct post categories, first-seen order.
#[must_use]
pub fn post_categories(posts: &[BlogPost]) -> Vec<String> {
    distinct_preserving_order(posts.iter().filter_map(|p| p.category.as_deref()))
}

/// Distinct post tags, first-seen order.
#[must_use]
pub fn post_tags(posts: &[BlogPost]) -> Vec<String> {
    distinct_preserving_order(
        posts
            .iter()
            .filter_map(|p| p.tags.as_deref())
            .flatten()
            .map(String::as_str),
    )
}

/// Distinct product materials, first-seen order.
#[must_use]
pub fn product_materials(products: &[Product]) -> Vec<String> {
    distinct_preserving_order(products.iter().filter_map(|p| p.material.as_deref()))
}

/// Distinct product colors, first-seen order.
#[must_use]
pub fn product_colors(products: &[Product]) -> Vec<String> {
    distinct_preserving_order(
        products
            .iter()
            .filter_map(|p| p.color.as_deref())
            .flatten()
            .map(String::as_str),
    )
}

/// Distinct FAQ categories, first-seen order.
#[must_use]
pub fn faq_categories(faqs: &[Faq]) -> Vec<String> {
    distinct_preserving_order(faqs.iter().filter_map(|f| f.category.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_products;

    fn post(category: Option<&str>, tags: &[&str]) -> BlogPost {
        BlogPost {
            id: "1".to_owned(),
            title: "Post".to_owned(),
            slug: "post".to_owned(),
            excerpt: None,
            content: None,
            image: None,
            author: "Author".to_owned(),
            category: category.map(ToOwned::to_owned),
            tags: Some(tags.iter().map(|t| (*t).to_owned()).collect()),
            published: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn distinct_preserves_first_seen_order() {
        let values = ["Wool", "Cotton", "Wool", "Jute", "Cotton"];
        assert_eq!(
            distinct_preserving_order(values),
            vec!["Wool".to_owned(), "Cotton".to_owned(), "Jute".to_owned()]
        );
    }

    #[test]
    fn post_facets_skip_missing_and_dedupe() {
        let posts = vec![
            post(Some("Styling Tips"), &["Interior Design", "Home Decor"]),
            post(None, &["Home Decor", "Handloom"]),
            post(Some("Styling Tips"), &[]),
            post(Some("Maintenance"), &["Rug Care"]),
        ];
        assert_eq!(
            post_categories(&posts),
            vec!["Styling Tips".to_owned(), "Maintenance".to_owned()]
        );
        assert_eq!(
            post_tags(&posts),
            vec![
                "Interior Design".to_owned(),
                "Home Decor".to_owned(),
                "Handloom".to_owned(),
                "Rug Care".to_owned(),
            ]
        );
    }

    #[test]
    fn product_facets_follow_catalog_order() {
        let products = sample_products();
        let materials = product_materials(&products);
        assert_eq!(materials.first().map(String::as_str), Some("Wool Blend"));
        assert_eq!(materials.len(), 8); // all sample materials are distinct

        let colors = product_colors(&products);
        assert_eq!(colors.first().map(String::as_str), Some("Ivory"));
        // "Beige" appears on three products but only once as a facet.
        assert_eq!(colors.iter().filter(|c| c.as_str() == "Beige").count(), 1);
    }

    #[test]
    fn price_ranges_cover_the_catalog() {
        let products = sample_products();
        for p in &products {
            assert!(
                PRICE_RANGES
                    .iter()
                    .any(|r| p.price >= r.min && p.price <= r.max)
            );
        }
    }
}
