//! Product filtering and sorting.
//!
//! Pure transformations over an in-memory product list supplied by the
//! caller. Filtering reduces the list by facet predicates that AND
//! together; sorting produces a new, stably ordered list. Neither mutates
//! its input, and an empty result is valid output, not a failure.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::records::Product;

/// A facet-based product filter.
///
/// Each set is a membership test that passes when the set is empty or the
/// product matches; the color test passes when the product's color set
/// intersects the filter set. The price test is an inclusive range. All
/// conditions AND together.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    /// Category display names to keep. Empty = keep all.
    pub categories: HashSet<String>,
    /// Materials to keep. Empty = keep all.
    pub materials: HashSet<String>,
    /// Colors to keep (intersection test). Empty = keep all.
    pub colors: HashSet<String>,
    /// Inclusive lower price bound.
    pub price_min: f64,
    /// Inclusive upper price bound.
    pub price_max: f64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            categories: HashSet::new(),
            materials: HashSet::new(),
            colors: HashSet::new(),
            price_min: 0.0,
            price_max: f64::INFINITY,
        }
    }
}

impl ProductFilter {
    /// Whether this filter keeps every product (the identity filter).
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.categories.is_empty()
            && self.materials.is_empty()
            && self.colors.is_empty()
            && self.price_min <= 0.0
            && self.price_max == f64::INFINITY
    }

    /// Whether a single product passes the filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.categories.is_empty() {
            let in_set = product
                .category
                .as_deref()
                .is_some_and(|c| self.categories.contains(c));
            if !in_set {
                return false;
            }
        }

        if !self.materials.is_empty() {
            let in_set = product
                .material
                .as_deref()
                .is_some_and(|m| self.materials.contains(m));
            if !in_set {
                return false;
            }
        }

        if !self.colors.is_empty() {
            let intersects = product
                .color
                .as_deref()
                .is_some_and(|colors| colors.iter().any(|c| self.colors.contains(c)));
            if !intersects {
                return false;
            }
        }

        product.price >= self.price_min && product.price <= self.price_max
    }

    /// Produce the subsequence of `products` passing the filter.
    ///
    /// Input order is preserved; the input is not mutated.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Ordering applied to a filtered product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Curated order: no reordering.
    #[default]
    Featured,
    /// New products first; ties keep prior relative order.
    Newest,
    /// Price ascending.
    PriceLow,
    /// Price descending.
    PriceHigh,
    /// Rating descending.
    Rating,
}

impl SortKey {
    /// Parse a sort key from its wire form (`price-low`, `rating`, ...).
    ///
    /// Returns `None` for unrecognized values; callers fall back to
    /// [`SortKey::Featured`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "featured" => Some(Self::Featured),
            "newest" => Some(Self::Newest),
            "price-low" => Some(Self::PriceLow),
            "price-high" => Some(Self::PriceHigh),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }

    /// The wire form of this sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }

    /// Produce a newly ordered copy of `products`.
    ///
    /// All orderings are stable, so ties keep the input's relative order.
    /// The input is not mutated.
    #[must_use]
    pub fn apply(self, products: &[Product]) -> Vec<Product> {
        let mut sorted = products.to_vec();
        match self {
            Self::Featured => {}
            Self::Newest => sorted.sort_by_key(|p| !p.is_new),
            Self::PriceLow => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Self::PriceHigh => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
            Self::Rating => sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
        sorted
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_products;

    fn set(values: &[&str]) -> HashSet<String> {
        values.iter().map(|v| (*v).to_owned()).collect()
    }

    #[test]
    fn unconstrained_filter_is_identity() {
        let products = sample_products();
        let filter = ProductFilter::default();
        assert!(filter.is_unconstrained());
        assert_eq!(filter.apply(&products), products);
    }

    #[test]
    fn output_is_a_subsequence_of_input() {
        let products = sample_products();
        let filter = ProductFilter {
            colors: set(&["Beige"]),
            price_max: 400.0,
            ..Default::default()
        };
        let out = filter.apply(&products);
        assert!(!out.is_empty());
        // Every output product exists in the input, in input order.
        let mut cursor = products.iter();
        for kept in &out {
            assert!(cursor.any(|p| p == kept));
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let products = sample_products();
        let filter = ProductFilter {
            materials: set(&["Cotton", "Jute"]),
            ..Default::default()
        };
        let once = filter.apply(&products);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn category_filter_selects_exact_products() {
        let products = sample_products();
        let filter = ProductFilter {
            categories: set(&["Shaggy Rugs"]),
            ..Default::default()
        };
        let out = filter.apply(&products);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.category.as_deref() == Some("Shaggy Rugs")));
    }

    #[test]
    fn color_filter_uses_set_intersection() {
        let products = sample_products();
        let filter = ProductFilter {
            colors: set(&["Gold"]),
            ..Default::default()
        };
        let out = filter.apply(&products);
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Modern Abstract Area Rug", "Traditional Persian Handloom"]
        );
    }

    #[test]
    fn conditions_and_together() {
        let products = sample_products();
        // "Area Rugs" alone keeps 3; adding a price cap narrows further.
        let filter = ProductFilter {
            categories: set(&["Area Rugs"]),
            price_max: 300.0,
            ..Default::default()
        };
        let out = filter.apply(&products);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.price <= 300.0));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let products = sample_products();
        let filter = ProductFilter {
            price_min: 179.0,
            price_max: 179.0,
            ..Default::default()
        };
        let out = filter.apply(&products);
        assert_eq!(out.len(), 1);
        assert_eq!(out.first().map(|p| p.price), Some(179.0));
    }

    #[test]
    fn empty_result_is_valid() {
        let products = sample_products();
        let filter = ProductFilter {
            categories: set(&["Outdoor Rugs"]),
            ..Default::default()
        };
        assert!(filter.apply(&products).is_empty());
    }

    #[test]
    fn products_missing_a_facet_fail_that_facet() {
        let mut products = sample_products();
        for p in &mut products {
            p.material = None;
        }
        let filter = ProductFilter {
            materials: set(&["Cotton"]),
            ..Default::default()
        };
        assert!(filter.apply(&products).is_empty());
    }

    #[test]
    fn price_low_orders_ascending() {
        let products = sample_products();
        let subset: Vec<_> = products
            .iter()
            .filter(|p| [299.0, 249.0, 349.0, 179.0].contains(&p.price))
            .cloned()
            .collect();
        let sorted = SortKey::PriceLow.apply(&subset);
        let prices: Vec<f64> = sorted.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![179.0, 249.0, 299.0, 349.0]);
    }

    #[test]
    fn price_low_reversed_equals_price_high() {
        let products = sample_products();
        let mut low = SortKey::PriceLow.apply(&products);
        low.reverse();
        let high = SortKey::PriceHigh.apply(&products);
        let low_prices: Vec<f64> = low.iter().map(|p| p.price).collect();
        let high_prices: Vec<f64> = high.iter().map(|p| p.price).collect();
        assert_eq!(low_prices, high_prices);
    }

    #[test]
    fn rating_orders_descending() {
        let products = sample_products();
        let sorted = SortKey::Rating.apply(&products);
        let ratings: Vec<f64> = sorted.iter().map(|p| p.rating).collect();
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn newest_is_stable_within_groups() {
        let products = sample_products();
        let sorted = SortKey::Newest.apply(&products);
        let (new, old): (Vec<_>, Vec<_>) = sorted.iter().partition(|p| p.is_new);
        // All new products come first.
        assert!(sorted.iter().take(new.len()).all(|p| p.is_new));
        // Within each group, input order is preserved.
        let input_new: Vec<&str> = products
            .iter()
            .filter(|p| p.is_new)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            new.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            input_new
        );
        let input_old: Vec<&str> = products
            .iter()
            .filter(|p| !p.is_new)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            old.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            input_old
        );
    }

    #[test]
    fn featured_is_identity_and_does_not_mutate() {
        let products = sample_products();
        let before = products.clone();
        let sorted = SortKey::Featured.apply(&products);
        assert_eq!(sorted, before);
        assert_eq!(products, before);
    }

    #[test]
    fn sorting_does_not_mutate_input() {
        let products = sample_products();
        let before = products.clone();
        let _sorted = SortKey::PriceHigh.apply(&products);
        assert_eq!(products, before);
    }

    #[test]
    fn sort_key_parses_wire_values() {
        assert_eq!(SortKey::parse("featured"), Some(SortKey::Featured));
        assert_eq!(SortKey::parse("newest"), Some(SortKey::Newest));
        assert_eq!(SortKey::parse("price-low"), Some(SortKey::PriceLow));
        assert_eq!(SortKey::parse("price-high"), Some(SortKey::PriceHigh));
        assert_eq!(SortKey::parse("rating"), Some(SortKey::Rating));
        assert_eq!(SortKey::parse("price_low"), None);
        assert_eq!(SortKey::parse(""), None);
    }

    #[test]
    fn sort_key_round_trips_as_str() {
        for key in [
            SortKey::Featured,
            SortKey::Newest,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Rating,
        ] {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
    }
}
