//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page data (featured tabs, deal, categories)
//!
//! # Catalog
//! GET  /shop                    - Full catalog with filtering and sorting
//! GET  /categories              - Category listing
//! GET  /category/{slug}         - Category detail with products
//! GET  /product/{slug}          - Product detail with related products
//! GET  /search                  - Product search (?q=...)
//!
//! # Blog
//! GET  /blog                    - Published posts with category/tag facets
//! GET  /blog/{slug}             - Post detail with recent posts
//!
//! # Static content
//! GET  /faqs                    - FAQs with category facet
//! GET  /testimonials            - Customer testimonials
//!
//! # Forms
//! POST /contact                 - Contact form submission
//! POST /newsletter/subscribe    - Newsletter subscribe (upsert)
//! POST /newsletter/unsubscribe  - Newsletter unsubscribe
//! ```

pub mod blog;
pub mod categories;
pub mod contact;
pub mod home;
pub mod newsletter;
pub mod pages;
pub mod products;
pub mod search;
pub mod shop;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the blog routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(blog::index))
        .route("/{slug}", get(blog::show))
}

/// Create the newsletter routes router.
pub fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::index))
        // Catalog
        .route("/shop", get(shop::index))
        .route("/categories", get(categories::index))
        .route("/category/{slug}", get(categories::show))
        .route("/product/{slug}", get(products::show))
        .route("/search", get(search::index))
        // Blog
        .nest("/blog", blog_routes())
        // Static content
        .route("/faqs", get(pages::faqs))
        .route("/testimonials", get(pages::testimonials))
        // Forms
        .route("/contact", post(contact::submit))
        .nest("/newsletter", newsletter_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::config::{DataStoreConfig, StorefrontConfig};
    use crate::state::AppState;

    use super::routes;

    // Handlers that validate before touching the network can be exercised
    // against a store that doesn't exist.
    fn test_state() -> AppState {
        let config = StorefrontConfig {
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 0,
            base_url: "http://localhost".to_string(),
            store: DataStoreConfig {
                rest_url: "http://127.0.0.1:1/rest/v1".to_string(),
                anon_key: "test-anon-key".to_string(),
                service_key: "zK9#mP2$vL8@qR5&xN3*wJ7!hT4^bG6%".to_string().into(),
                timeout: std::time::Duration::from_secs(1),
                cache_ttl: std::time::Duration::from_secs(60),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 0.0,
            sentry_traces_sample_rate: 0.0,
        };
        AppState::new(config).unwrap()
    }

    async fn send_json(path: &str, body: &str) -> StatusCode {
        let app = routes().with_state(test_state());
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap();
        app.oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn contact_rejects_missing_message_before_any_store_call() {
        let status = send_json(
            "/contact",
            r#"{"name":"Jane","email":"jane@example.com","message":"  "}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn contact_rejects_malformed_email() {
        let status = send_json(
            "/contact",
            r#"{"name":"Jane","email":"not-an-email","message":"hello"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn newsletter_rejects_malformed_email() {
        let status = send_json("/newsletter/subscribe", r#"{"email":"@nope"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let status = send_json("/newsletter/unsubscribe", r#"{"email":""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn static_content_routes_respond_without_a_store() {
        let app = routes().with_state(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/faqs")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let app = routes().with_state(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/testimonials")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_slug_is_a_not_found_without_a_store_call() {
        let app = routes().with_state(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/product/Not%20A%20Slug")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_sort_key_is_not_rejected() {
        // The sort degrades to featured, so the handler proceeds to the
        // store (unreachable here) instead of answering 400.
        let app = routes().with_state(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/shop?sort=cheapest")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_ne!(response.status(), StatusCode::BAD_REQUEST);
    }
}
