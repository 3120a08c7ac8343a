//! Category route handlers.

use aristo_weaves_core::{Category, Slug};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::ProductQuery;

use super::products::ProductView;

/// Category display data for the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub product_count: i64,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            slug: category.slug,
            name: category.name,
            image: category.image,
            product_count: category.product_count,
        }
    }
}

/// Category detail response.
#[derive(Debug, Serialize)]
pub struct CategoryDetailView {
    pub category: CategoryView,
    pub products: Vec<ProductView>,
}

/// List all categories.
///
/// GET /categories
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CategoryView>>> {
    let categories = state.store().list_categories().await?;
    Ok(Json(categories.into_iter().map(CategoryView::from).collect()))
}

/// Display one category with its in-stock products.
///
/// GET /category/{slug}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryDetailView>> {
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(format!("category {slug}")))?;

    let category = state
        .store()
        .get_category_by_slug(slug.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {slug}")))?;

    let query = ProductQuery {
        category_id: Some(category.id.clone()),
        ..ProductQuery::default()
    };
    let products = state.store().list_products(&query).await?;

    Ok(Json(CategoryDetailView {
        category: CategoryView::from(category),
        products: products.into_iter().map(ProductView::from).collect(),
    }))
}
