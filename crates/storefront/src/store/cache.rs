//! Cache value types for data store responses.
//!
//! Cached under string keys like `"products:all"` or `"product:{slug}"`.
//! Write operations never touch the cache.

use aristo_weaves_core::{BlogPost, Category, Product};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Category(Box<Category>),
    Products(Vec<Product>),
    Product(Box<Product>),
    Posts(Vec<BlogPost>),
    Post(Box<BlogPost>),
}
