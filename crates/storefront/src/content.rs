//! Static storefront content.
//!
//! FAQs and testimonials change with marketing copy, not with the catalog,
//! so they ship with the binary instead of living in the data store. The
//! JSON files under `content/` are embedded at compile time and parsed
//! once at startup.

use aristo_weaves_core::{Faq, Testimonial};

const FAQS_JSON: &str = include_str!("../content/faqs.json");
const TESTIMONIALS_JSON: &str = include_str!("../content/testimonials.json");

/// Parsed static content, loaded once into [`crate::state::AppState`].
#[derive(Debug, Clone)]
pub struct ContentLibrary {
    faqs: Vec<Faq>,
    testimonials: Vec<Testimonial>,
}

impl ContentLibrary {
    /// Parse the embedded content files.
    ///
    /// # Errors
    ///
    /// Returns a parse error if an embedded file is malformed. This fails
    /// startup: shipping a binary with broken content is a build defect,
    /// not a runtime condition to degrade around.
    pub fn load() -> Result<Self, serde_json::Error> {
        Ok(Self {
            faqs: serde_json::from_str(FAQS_JSON)?,
            testimonials: serde_json::from_str(TESTIMONIALS_JSON)?,
        })
    }

    /// All FAQs, in authored order.
    #[must_use]
    pub fn faqs(&self) -> &[Faq] {
        &self.faqs
    }

    /// All testimonials, in authored order.
    #[must_use]
    pub fn testimonials(&self) -> &[Testimonial] {
        &self.testimonials
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_parses() {
        let content = ContentLibrary::load().unwrap();
        assert_eq!(content.faqs().len(), 8);
        assert_eq!(content.testimonials().len(), 3);
    }

    #[test]
    fn faqs_have_categories() {
        let content = ContentLibrary::load().unwrap();
        assert!(content.faqs().iter().all(|f| f.category.is_some()));
    }

    #[test]
    fn testimonial_ratings_are_in_range() {
        let content = ContentLibrary::load().unwrap();
        assert!(
            content
                .testimonials()
                .iter()
                .all(|t| (1..=5).contains(&t.rating))
        );
    }
}
