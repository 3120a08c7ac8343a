//! Data store REST client implementation.
//!
//! Speaks the store's PostgREST-style query conventions (`?slug=eq.x`,
//! `order=`, `on_conflict=`) with `reqwest`. Catalog reads are cached
//! using `moka` for the configured TTL.

use std::collections::HashMap;
use std::sync::Arc;

use aristo_weaves_core::{
    BlogPost, Category, ContactSubmission, Email, NewsletterSubscription, Product,
};
use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::StoreError;
use super::cache::CacheValue;
use crate::config::DataStoreConfig;

/// Maximum response-body characters echoed into error messages and logs.
const ERROR_BODY_LIMIT: usize = 500;

/// How many related products a detail view shows.
const RELATED_LIMIT: usize = 4;

/// Default result cap for catalog search.
const SEARCH_LIMIT: usize = 20;

/// Upsert target for newsletter subscriptions. Conflicting on the email
/// unique constraint is what keeps a re-subscribe from inserting a
/// duplicate row.
const NEWSLETTER_UPSERT_PATH: &str = "newsletter_subscriptions?on_conflict=email";

/// Merge the conflicting row instead of erroring, and echo the resulting
/// record so the caller sees the final `subscribed` state.
const NEWSLETTER_UPSERT_PREFER: &str = "resolution=merge-duplicates,return=representation";

// =============================================================================
// StoreClient
// =============================================================================

/// Client for the hosted data store's REST API.
///
/// Provides typed access to the read collections (categories, products,
/// blog posts) and the two write operations (contact insert, newsletter
/// upsert). Catalog reads are cached; writes never are.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    rest_url: String,
    anon_key: String,
    service_key: String,
    cache: Cache<String, CacheValue>,
}

/// Optional narrowing for product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category_id: Option<String>,
    pub is_best_seller: Option<bool>,
    pub is_new: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl ProductQuery {
    /// Render as a PostgREST path with query string.
    ///
    /// Listings only ever show in-stock products, newest first.
    fn to_path(&self) -> String {
        use std::fmt::Write;

        let mut path = String::from("products?select=*&in_stock=eq.true&order=created_at.desc");
        if let Some(id) = &self.category_id {
            let _ = write!(path, "&category_id=eq.{}", encode(id));
        }
        if let Some(flag) = self.is_best_seller {
            let _ = write!(path, "&is_best_seller=eq.{flag}");
        }
        if let Some(flag) = self.is_new {
            let _ = write!(path, "&is_new=eq.{flag}");
        }
        if let Some(limit) = self.limit {
            let _ = write!(path, "&limit={limit}");
        }
        if let Some(offset) = self.offset {
            let _ = write!(path, "&offset={offset}");
        }
        path
    }

    fn cache_key(&self) -> String {
        format!("products:{}", self.to_path())
    }
}

impl StoreClient {
    /// Create a new data store client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &DataStoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(StoreClientInner {
                client,
                rest_url: config.rest_url.clone(),
                anon_key: config.anon_key.clone(),
                service_key: config.service_key.expose_secret().to_string(),
                cache,
            }),
        })
    }

    fn request(&self, method: reqwest::Method, path_and_query: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.inner.rest_url, path_and_query);
        self.inner
            .client
            .request(method, url)
            .header("apikey", &self.inner.anon_key)
            .bearer_auth(&self.inner.service_key)
    }

    /// Fetch and parse a row set, retrying once on transient failure.
    ///
    /// GETs are idempotent, so a single retry after a timeout or connect
    /// failure is safe. Deterministic errors are returned immediately.
    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<Vec<T>, StoreError> {
        match self.try_fetch_rows(path_and_query).await {
            Err(e) if e.is_transient() => {
                tracing::warn!(error = %e, path = %path_and_query, "transient store error, retrying once");
                self.try_fetch_rows(path_and_query).await
            }
            other => other,
        }
    }

    async fn try_fetch_rows<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, path_and_query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&body),
                "store returned non-success status"
            );
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: truncate(&body),
            });
        }

        match serde_json::from_str(&body) {
            Ok(rows) => Ok(rows),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %truncate(&body),
                    "failed to parse store response"
                );
                Err(StoreError::Parse(e))
            }
        }
    }

    /// Send a write and return the raw response body. Never retried.
    async fn send_write(
        &self,
        method: reqwest::Method,
        path_and_query: &str,
        body: &serde_json::Value,
        prefer: &str,
    ) -> Result<String, StoreError> {
        let response = self
            .request(method, path_and_query)
            .header("Prefer", prefer)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&text),
                "store write failed"
            );
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: truncate(&text),
            });
        }

        Ok(text)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> =
            self.fetch_rows("categories?select=*&order=name.asc").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get a category by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails. A missing category is
    /// `Ok(None)`, not an error.
    #[instrument(skip(self))]
    pub async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let cache_key = format!("category:{slug}");

        if let Some(CacheValue::Category(category)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for category");
            return Ok(Some(*category));
        }

        let rows: Vec<Category> = self
            .fetch_rows(&format!("categories?select=*&slug=eq.{}&limit=1", encode(slug)))
            .await?;
        let category = rows.into_iter().next();

        if let Some(category) = &category {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Category(Box::new(category.clone())))
                .await;
        }

        Ok(category)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List in-stock products, newest first, optionally narrowed by
    /// [`ProductQuery`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        let cache_key = query.cache_key();

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for products");
            return Ok(products);
        }

        let mut products: Vec<Product> = self.fetch_rows(&query.to_path()).await?;
        self.hydrate_category_names(&mut products).await?;
        audit_discounts(&products);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by its slug.
    ///
    /// Detail views also show out-of-stock products, so no stock filter is
    /// applied here.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        let cache_key = format!("product:{slug}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(Some(*product));
        }

        let mut rows: Vec<Product> = self
            .fetch_rows(&format!("products?select=*&slug=eq.{}&limit=1", encode(slug)))
            .await?;
        self.hydrate_category_names(&mut rows).await?;
        audit_discounts(&rows);
        let product = rows.into_iter().next();

        if let Some(product) = &product {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
                .await;
        }

        Ok(product)
    }

    /// In-stock products from the same category, excluding the product
    /// itself, highest rated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self, product), fields(slug = %product.slug))]
    pub async fn related_products(&self, product: &Product) -> Result<Vec<Product>, StoreError> {
        let Some(category_id) = product.category_id.as_deref() else {
            return Ok(Vec::new());
        };

        let cache_key = format!("related:{}", product.id);
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for related products");
            return Ok(products);
        }

        let path = format!(
            "products?select=*&category_id=eq.{}&id=neq.{}&in_stock=eq.true&order=rating.desc&limit={RELATED_LIMIT}",
            encode(category_id),
            encode(&product.id),
        );
        let mut products: Vec<Product> = self.fetch_rows(&path).await?;
        self.hydrate_category_names(&mut products).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Search in-stock products by name or description, highest rated
    /// first. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, StoreError> {
        // The or= filter uses commas and parentheses as syntax; strip them
        // from the term so user input cannot alter the filter structure.
        let cleaned: String = term
            .chars()
            .filter(|c| !matches!(c, ',' | '(' | ')'))
            .collect();
        let pattern = encode(&format!("*{}*", cleaned.trim()));

        let path = format!(
            "products?select=*&or=(name.ilike.{pattern},description.ilike.{pattern})&in_stock=eq.true&order=rating.desc&limit={SEARCH_LIMIT}",
        );
        let mut products: Vec<Product> = self.fetch_rows(&path).await?;
        self.hydrate_category_names(&mut products).await?;
        Ok(products)
    }

    /// Fill in denormalized category display names from the category list.
    ///
    /// Raw product rows carry only `category_id`; the filter engine and the
    /// views work with display names.
    async fn hydrate_category_names(&self, products: &mut [Product]) -> Result<(), StoreError> {
        let needs_hydration = products
            .iter()
            .any(|p| p.category.is_none() && p.category_id.is_some());
        if !needs_hydration {
            return Ok(());
        }

        let categories = self.list_categories().await?;
        let names: HashMap<&str, &str> = categories
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();

        for product in products.iter_mut() {
            if product.category.is_none()
                && let Some(id) = product.category_id.as_deref()
            {
                product.category = names.get(id).map(|name| (*name).to_owned());
            }
        }

        Ok(())
    }

    // =========================================================================
    // Blog Posts
    // =========================================================================

    /// List published posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list_posts(&self, limit: Option<usize>) -> Result<Vec<BlogPost>, StoreError> {
        let cache_key = "posts".to_string();

        let posts = if let Some(CacheValue::Posts(posts)) = self.inner.cache.get(&cache_key).await
        {
            debug!("cache hit for posts");
            posts
        } else {
            let posts: Vec<BlogPost> = self
                .fetch_rows("blog_posts?select=*&published=eq.true&order=created_at.desc")
                .await?;
            self.inner
                .cache
                .insert(cache_key, CacheValue::Posts(posts.clone()))
                .await;
            posts
        };

        Ok(match limit {
            Some(limit) => posts.into_iter().take(limit).collect(),
            None => posts,
        })
    }

    /// Get a published post by its slug. Drafts are invisible here.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        let cache_key = format!("post:{slug}");

        if let Some(CacheValue::Post(post)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for post");
            return Ok(Some(*post));
        }

        let rows: Vec<BlogPost> = self
            .fetch_rows(&format!(
                "blog_posts?select=*&published=eq.true&slug=eq.{}&limit=1",
                encode(slug)
            ))
            .await?;
        let post = rows.into_iter().next();

        if let Some(post) = &post {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Post(Box::new(post.clone())))
                .await;
        }

        Ok(post)
    }

    /// Most recent published posts, optionally excluding one slug (the
    /// post currently being read).
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn recent_posts(
        &self,
        limit: usize,
        exclude_slug: Option<&str>,
    ) -> Result<Vec<BlogPost>, StoreError> {
        let posts = self.list_posts(None).await?;
        Ok(posts
            .into_iter()
            .filter(|p| exclude_slug != Some(p.slug.as_str()))
            .take(limit)
            .collect())
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a contact-form submission with status `new`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the insert or the echoed
    /// record cannot be parsed.
    #[instrument(skip(self, message), fields(email = %email))]
    pub async fn submit_contact(
        &self,
        name: &str,
        email: &Email,
        message: &str,
    ) -> Result<ContactSubmission, StoreError> {
        let body = serde_json::json!({
            "name": name,
            "email": email.as_str(),
            "message": message,
            "status": "new",
        });

        let text = self
            .send_write(
                reqwest::Method::POST,
                "contact_submissions",
                &body,
                "return=representation",
            )
            .await?;

        let rows: Vec<ContactSubmission> = serde_json::from_str(&text)?;
        rows.into_iter().next().ok_or_else(|| StoreError::Api {
            status: 200,
            message: "store returned an empty representation".to_string(),
        })
    }

    /// Subscribe an email to the newsletter.
    ///
    /// Upserts on the email's unique constraint, so re-subscribing never
    /// creates a duplicate record and flips `subscribed` back to true for
    /// previously unsubscribed addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the upsert.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn subscribe_newsletter(
        &self,
        email: &Email,
    ) -> Result<NewsletterSubscription, StoreError> {
        let body = serde_json::json!({
            "email": email.as_str(),
            "subscribed": true,
        });

        let text = self
            .send_write(
                reqwest::Method::POST,
                NEWSLETTER_UPSERT_PATH,
                &body,
                NEWSLETTER_UPSERT_PREFER,
            )
            .await?;

        let rows: Vec<NewsletterSubscription> = serde_json::from_str(&text)?;
        rows.into_iter().next().ok_or_else(|| StoreError::Api {
            status: 200,
            message: "store returned an empty representation".to_string(),
        })
    }

    /// Mark an email as unsubscribed. Unknown addresses are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the update.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn unsubscribe_newsletter(&self, email: &Email) -> Result<(), StoreError> {
        let body = serde_json::json!({ "subscribed": false });

        self.send_write(
            reqwest::Method::PATCH,
            &format!("newsletter_subscriptions?email=eq.{}", encode(email.as_str())),
            &body,
            "return=minimal",
        )
        .await?;

        Ok(())
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Verify the store answers at all. Used by the readiness probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the request.
    pub async fn health(&self) -> Result<(), StoreError> {
        let response = self.request(reqwest::Method::GET, "").send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(StoreError::Api {
                status: status.as_u16(),
                message: "readiness probe rejected".to_string(),
            })
        }
    }
}

/// Percent-encode a value for use in a query string.
fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn truncate(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

/// Log products whose stored discount disagrees with their price fields.
///
/// The store does not enforce this invariant; surfacing the mismatch in
/// logs is deliberate in place of rejecting or "fixing" the record.
fn audit_discounts(products: &[Product]) {
    for product in products {
        if product.discount_is_consistent() == Some(false) {
            tracing::debug!(
                slug = %product.slug,
                price = product.price,
                original_price = ?product.original_price,
                discount = ?product.discount,
                "stored discount disagrees with price fields"
            );
        }
    }
}
