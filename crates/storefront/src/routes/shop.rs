//! Shop route handler: the full catalog with filtering and sorting.

use std::collections::HashSet;

use aristo_weaves_core::{
    PRICE_RANGES, PriceRange, ProductFilter, SortKey,
    catalog::facets::{product_colors, product_materials},
};
use axum::{Json, extract::Query, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::store::ProductQuery;

use super::products::ProductView;

/// Query parameters accepted by the shop endpoint.
///
/// Multi-value filters arrive as comma-separated lists so the URL stays
/// shareable: `/shop?categories=Shaggy%20Rugs,Area%20Rugs&sort=price-low`.
#[derive(Debug, Default, Deserialize)]
pub struct ShopParams {
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(default)]
    pub materials: Option<String>,
    #[serde(default)]
    pub colors: Option<String>,
    #[serde(default)]
    pub price_min: Option<f64>,
    #[serde(default)]
    pub price_max: Option<f64>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl ShopParams {
    fn filter(&self) -> ProductFilter {
        ProductFilter {
            categories: parse_csv(self.categories.as_deref()),
            materials: parse_csv(self.materials.as_deref()),
            colors: parse_csv(self.colors.as_deref()),
            price_min: self.price_min.unwrap_or(0.0),
            price_max: self.price_max.unwrap_or(f64::INFINITY),
        }
    }

    /// Unknown or missing sort values degrade to the featured ordering, so
    /// a stale link never errors.
    fn sort_key(&self) -> SortKey {
        self.sort
            .as_deref()
            .and_then(SortKey::parse)
            .unwrap_or_default()
    }
}

/// Split a comma-separated filter value into a set, dropping blanks.
fn parse_csv(value: Option<&str>) -> HashSet<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Facet values available for the current catalog.
#[derive(Debug, Serialize)]
pub struct ShopFacets {
    pub categories: Vec<CategoryFacet>,
    pub materials: Vec<String>,
    pub colors: Vec<String>,
    pub price_ranges: &'static [PriceRange],
}

#[derive(Debug, Serialize)]
pub struct CategoryFacet {
    pub name: String,
    pub slug: String,
    pub product_count: i64,
}

/// Shop response: filtered, sorted products plus sidebar facets.
#[derive(Debug, Serialize)]
pub struct ShopView {
    pub total: usize,
    pub showing: usize,
    pub sort: &'static str,
    pub products: Vec<ProductView>,
    pub facets: ShopFacets,
}

/// Display the shop with filters applied.
///
/// GET /shop
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ShopParams>,
) -> Result<Json<ShopView>> {
    let sort = params.sort_key();
    let filter = params.filter();

    let catalog = state.store().list_products(&ProductQuery::default()).await?;
    let categories = state.store().list_categories().await?;

    // Facets come from the unfiltered catalog so narrowing one facet never
    // hides the others.
    let facets = ShopFacets {
        categories: categories
            .into_iter()
            .map(|c| CategoryFacet {
                name: c.name,
                slug: c.slug,
                product_count: c.product_count,
            })
            .collect(),
        materials: product_materials(&catalog),
        colors: product_colors(&catalog),
        price_ranges: &PRICE_RANGES,
    };

    let total = catalog.len();
    let products = sort.apply(&filter.apply(&catalog));

    Ok(Json(ShopView {
        total,
        showing: products.len(),
        sort: sort.as_str(),
        products: products.into_iter().map(ProductView::from).collect(),
        facets,
    }))
}
