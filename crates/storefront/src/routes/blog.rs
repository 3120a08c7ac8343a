//! Blog route handlers.

use aristo_weaves_core::{
    BlogPost, Slug,
    catalog::facets::{post_categories, post_tags},
};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Posts shown in "recent posts" sidebars.
pub const RECENT_POSTS: usize = 3;

/// Blog post display data for the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl From<BlogPost> for PostView {
    fn from(post: BlogPost) -> Self {
        Self {
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            image: post.image,
            author: post.author,
            category: post.category,
            tags: post.tags.unwrap_or_default(),
            published_at: post.created_at,
        }
    }
}

/// Blog index response.
#[derive(Debug, Serialize)]
pub struct BlogIndexView {
    pub posts: Vec<PostView>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

/// Blog post detail response, with full content and recent posts.
#[derive(Debug, Serialize)]
pub struct PostDetailView {
    #[serde(flatten)]
    pub post: PostView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub recent: Vec<PostView>,
}

/// List published posts with category and tag facets.
///
/// GET /blog
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<BlogIndexView>> {
    let posts = state.store().list_posts(None).await?;

    let categories = post_categories(&posts);
    let tags = post_tags(&posts);

    Ok(Json(BlogIndexView {
        posts: posts.into_iter().map(PostView::from).collect(),
        categories,
        tags,
    }))
}

/// Display one published post.
///
/// GET /blog/{slug}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetailView>> {
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound(format!("post {slug}")))?;

    let post = state
        .store()
        .get_post_by_slug(slug.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {slug}")))?;

    let recent = state
        .store()
        .recent_posts(RECENT_POSTS, Some(&post.slug))
        .await?
        .into_iter()
        .map(PostView::from)
        .collect();

    let content = post.content.clone();
    Ok(Json(PostDetailView {
        post: PostView::from(post),
        content,
        recent,
    }))
}
