//! Home route handler.

use aristo_weaves_core::catalog::featured;
use axum::{Json, extract::State};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

use super::blog::{PostView, RECENT_POSTS};
use super::categories::CategoryView;
use super::pages::TestimonialView;
use super::products::ProductView;

/// Deal-of-the-day block: one discounted product with a countdown target.
#[derive(Debug, Serialize)]
pub struct DealView {
    pub product: ProductView,
    pub ends_at: NaiveDateTime,
}

/// Home page response.
///
/// The featured tabs are segmented server-side so every client renders the
/// same four products per tab.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub latest: Vec<ProductView>,
    pub popular: Vec<ProductView>,
    pub best_sellers: Vec<ProductView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal: Option<DealView>,
    pub categories: Vec<CategoryView>,
    pub testimonials: Vec<TestimonialView>,
    pub recent_posts: Vec<PostView>,
}

/// Display the home page.
///
/// GET /
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<HomeView>> {
    let store = state.store();
    let products = store.list_products(&crate::store::ProductQuery::default()).await?;
    let categories = store.list_categories().await?;
    let recent_posts = store.recent_posts(RECENT_POSTS, None).await?;

    let deal = featured::deal_of_the_day(&products).and_then(|p| {
        p.deal_end_time.map(|ends_at| DealView {
            product: ProductView::from(p.clone()),
            ends_at,
        })
    });

    Ok(Json(HomeView {
        latest: featured::latest(&products)
            .into_iter()
            .map(ProductView::from)
            .collect(),
        popular: featured::popular(&products)
            .into_iter()
            .map(ProductView::from)
            .collect(),
        best_sellers: featured::best_sellers(&products)
            .into_iter()
            .map(ProductView::from)
            .collect(),
        deal,
        categories: categories.into_iter().map(CategoryView::from).collect(),
        testimonials: state
            .content()
            .testimonials()
            .iter()
            .cloned()
            .map(TestimonialView::from)
            .collect(),
        recent_posts: recent_posts.into_iter().map(PostView::from).collect(),
    }))
}
