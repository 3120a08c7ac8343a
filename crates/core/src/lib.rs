//! Aristo Weaves Core - Shared catalog library.
//!
//! This crate provides the common types used across all Aristo Weaves
//! components:
//! - `storefront` - Public-facing storefront API
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for validated emails and slugs
//! - [`catalog`] - Catalog records plus the filter/sort/facet engine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
