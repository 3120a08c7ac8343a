//! Core value types for Aristo Weaves.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod slug;

pub use email::{Email, EmailError};
pub use slug::{Slug, SlugError};
