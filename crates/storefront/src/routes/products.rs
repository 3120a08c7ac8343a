//! Product route handlers.

use aristo_weaves_core::{Product, Slug};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data for the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub slug: String,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
    pub rating: f64,
    pub reviews: i64,
    pub image: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    pub color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub in_stock: bool,
    pub stock_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub features: Vec<String>,
    pub is_best_seller: bool,
    pub is_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_end_time: Option<NaiveDateTime>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let images = product.all_images();
        Self {
            slug: product.slug,
            name: product.name,
            price: product.price,
            original_price: product.original_price,
            discount: product.discount,
            rating: product.rating,
            reviews: product.reviews,
            image: product.image,
            images,
            category: product.category,
            material: product.material,
            color: product.color.unwrap_or_default(),
            size: product.size,
            in_stock: product.in_stock,
            stock_count: product.stock_count,
            description: product.description,
            features: product.features.unwrap_or_default(),
            is_best_seller: product.is_best_seller,
            is_new: product.is_new,
            deal_end_time: product.deal_end_time,
        }
    }
}

/// Product detail response.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    pub product: ProductView,
    pub related: Vec<ProductView>,
}

/// Display product detail with related products.
///
/// GET /product/{slug}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetailView>> {
    // A slug that can't exist in the store is a 404 without a round-trip.
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(format!("product {slug}")))?;

    let product = state
        .store()
        .get_product_by_slug(slug.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {slug}")))?;

    let related = state
        .store()
        .related_products(&product)
        .await?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(Json(ProductDetailView {
        product: ProductView::from(product),
        related,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_falls_back_to_primary_image() {
        let product = Product {
            id: "1".to_owned(),
            name: "Rug".to_owned(),
            slug: "rug".to_owned(),
            price: 100.0,
            original_price: None,
            discount: None,
            rating: 4.5,
            reviews: 2,
            image: "primary.jpg".to_owned(),
            images: None,
            category_id: None,
            category: None,
            material: None,
            color: None,
            size: None,
            in_stock: true,
            stock_count: 1,
            description: None,
            features: None,
            is_best_seller: false,
            is_new: false,
            deal_end_time: None,
            created_at: None,
            updated_at: None,
        };
        let view = ProductView::from(product);
        assert_eq!(view.images, vec!["primary.jpg".to_owned()]);
        assert!(view.color.is_empty());
        assert!(view.features.is_empty());
    }
}
