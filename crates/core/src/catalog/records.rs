//! Catalog records as stored by the hosted data store.
//!
//! Field names follow the store's snake_case column names so these types
//! deserialize straight off the wire. Lifecycle: all records are created
//! and updated externally; the storefront reads them and appends only
//! contact submissions and newsletter subscriptions.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Sale price. Always >= 0 in store data.
    pub price: f64,
    /// Pre-discount price, when the product is on sale.
    #[serde(default)]
    pub original_price: Option<f64>,
    /// Stored discount percentage. Redundant with price/original_price and
    /// not validated by the store; see [`Product::discount_is_consistent`].
    #[serde(default)]
    pub discount: Option<i64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: i64,
    pub image: String,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Denormalized category display name. Absent on raw rows; the store
    /// client hydrates it from the category list.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    /// Color set. Non-empty when present.
    #[serde(default)]
    pub color: Option<Vec<String>>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_count: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_new: bool,
    /// End of a limited-time deal, store-local time without offset.
    #[serde(default)]
    pub deal_end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// All product images, falling back to the primary image.
    #[must_use]
    pub fn all_images(&self) -> Vec<String> {
        match &self.images {
            Some(images) if !images.is_empty() => images.clone(),
            _ => vec![self.image.clone()],
        }
    }

    /// Whether the stored discount agrees with `round(100 * (1 - price /
    /// original_price))`.
    ///
    /// Returns `None` when the product has no discount or no original
    /// price. The store does not enforce this invariant, so callers log
    /// disagreements rather than rejecting the record.
    #[must_use]
    pub fn discount_is_consistent(&self) -> Option<bool> {
        let discount = self.discount?;
        let original = self.original_price?;
        if original <= 0.0 {
            return Some(false);
        }
        #[allow(clippy::cast_possible_truncation)]
        let expected = (100.0 * (1.0 - self.price / original)).round() as i64;
        Some(expected == discount)
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Stored slug; authoritative, never derived from `name` at render time.
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Denormalized count maintained by the store.
    #[serde(default)]
    pub product_count: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub author: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A customer testimonial. Served as static content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub rating: i64,
    pub text: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// A frequently asked question. Served as static content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// A stored contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A stored newsletter subscription, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterSubscription {
    pub id: String,
    pub email: String,
    pub subscribed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sale_product(price: f64, original: Option<f64>, discount: Option<i64>) -> Product {
        Product {
            id: "1".to_owned(),
            name: "Rug".to_owned(),
            slug: "rug".to_owned(),
            price,
            original_price: original,
            discount,
            rating: 4.5,
            reviews: 10,
            image: "rug.jpg".to_owned(),
            images: None,
            category_id: None,
            category: None,
            material: None,
            color: None,
            size: None,
            in_stock: true,
            stock_count: 5,
            description: None,
            features: None,
            is_best_seller: false,
            is_new: false,
            deal_end_time: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn discount_consistency_agrees_with_rounded_formula() {
        // 299 vs 399 -> round(100 * (1 - 299/399)) = 25
        let p = sale_product(299.0, Some(399.0), Some(25));
        assert_eq!(p.discount_is_consistent(), Some(true));

        // 249 vs 329 -> round(24.3) = 24
        let p = sale_product(249.0, Some(329.0), Some(24));
        assert_eq!(p.discount_is_consistent(), Some(true));

        let p = sale_product(249.0, Some(329.0), Some(30));
        assert_eq!(p.discount_is_consistent(), Some(false));
    }

    #[test]
    fn discount_consistency_undefined_without_both_fields() {
        assert_eq!(sale_product(349.0, None, None).discount_is_consistent(), None);
        assert_eq!(
            sale_product(349.0, Some(400.0), None).discount_is_consistent(),
            None
        );
        assert_eq!(
            sale_product(349.0, None, Some(10)).discount_is_consistent(),
            None
        );
    }

    #[test]
    fn all_images_falls_back_to_primary() {
        let mut p = sale_product(100.0, None, None);
        assert_eq!(p.all_images(), vec!["rug.jpg".to_owned()]);

        p.images = Some(vec!["a.jpg".to_owned(), "b.jpg".to_owned()]);
        assert_eq!(p.all_images().len(), 2);

        p.images = Some(Vec::new());
        assert_eq!(p.all_images(), vec!["rug.jpg".to_owned()]);
    }

    #[test]
    fn product_deserializes_from_store_row() {
        // A raw row has no denormalized category and may omit nullable columns.
        let row = serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Luxe Shaggy Ivory Rug",
            "slug": "luxe-shaggy-ivory-rug",
            "price": 299,
            "original_price": 399,
            "discount": 25,
            "rating": 4.8,
            "reviews": 124,
            "image": "rug.jpg",
            "category_id": "c1",
            "material": "Wool Blend",
            "color": ["Ivory", "Cream"],
            "in_stock": true,
            "stock_count": 15,
            "is_best_seller": true,
            "is_new": false,
            "created_at": "2025-11-01T10:00:00Z"
        });
        let product: Product = serde_json::from_value(row).unwrap();
        assert_eq!(product.slug, "luxe-shaggy-ivory-rug");
        assert_eq!(product.category, None);
        assert_eq!(product.discount, Some(25));
        assert!(product.created_at.is_some());
    }
}
