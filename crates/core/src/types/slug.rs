//! URL-safe slug type.
//!
//! Slugs are stored alongside display names in the data store and are
//! authoritative: they are never re-derived from display names at render
//! time. [`Slug::from_display_name`] exists for seeding and tests only.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits and hyphens")]
    InvalidCharacter,
    /// The input starts or ends with a hyphen.
    #[error("slug cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A URL-safe identifier, e.g. `luxe-shaggy-ivory-rug`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains characters outside
    /// `[a-z0-9-]`, or starts/ends with a hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(SlugError::InvalidCharacter);
        }
        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }
        Ok(Self(s.to_owned()))
    }

    /// Derive a slug from a display name ("Shaggy Rugs" -> "shaggy-rugs").
    ///
    /// # Errors
    ///
    /// Returns an error if nothing slug-safe remains after normalization.
    pub fn from_display_name(name: &str) -> Result<Self, SlugError> {
        let normalized: String = name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
            .collect();

        // Collapse runs of hyphens left behind by stripped punctuation.
        let mut collapsed = String::with_capacity(normalized.len());
        for c in normalized.chars() {
            if c == '-' && collapsed.ends_with('-') {
                continue;
            }
            collapsed.push(c);
        }

        Self::parse(collapsed.trim_matches('-'))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
