//! Home-page product segmentation.
//!
//! The home view shows three tab panels (latest, popular, best selling)
//! and an optional deal-of-the-day spotlight. Each segment keeps the
//! catalog's order and caps at [`TAB_SIZE`] products.

use super::records::Product;

/// Products shown per home-page tab.
pub const TAB_SIZE: usize = 4;

/// Minimum rating for the "popular" tab.
pub const POPULAR_MIN_RATING: f64 = 4.7;

/// Newly arrived products.
#[must_use]
pub fn latest(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_new)
        .take(TAB_SIZE)
        .cloned()
        .collect()
}

/// Highly rated products.
#[must_use]
pub fn popular(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.rating >= POPULAR_MIN_RATING)
        .take(TAB_SIZE)
        .cloned()
        .collect()
}

/// Best-selling products.
#[must_use]
pub fn best_sellers(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_best_seller)
        .take(TAB_SIZE)
        .cloned()
        .collect()
}

/// The first product with a running deal, if any.
#[must_use]
pub fn deal_of_the_day(products: &[Product]) -> Option<&Product> {
    products.iter().find(|p| p.deal_end_time.is_some())
}
