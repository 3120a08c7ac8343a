//! Product search route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

use super::products::ProductView;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Search response.
#[derive(Debug, Serialize)]
pub struct SearchView {
    pub query: String,
    pub products: Vec<ProductView>,
}

/// Search products by name or description.
///
/// GET /search?q=...
///
/// A blank query returns no results rather than the whole catalog.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchView>> {
    let query = params.q.trim().to_owned();
    if query.is_empty() {
        return Ok(Json(SearchView {
            query,
            products: Vec::new(),
        }));
    }

    let products = state.store().search_products(&query).await?;

    Ok(Json(SearchView {
        query,
        products: products.into_iter().map(ProductView::from).collect(),
    }))
}
