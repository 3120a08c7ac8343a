//! Static content routes: FAQs and testimonials.

use aristo_weaves_core::{Faq, Testimonial, catalog::facets::faq_categories};
use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// FAQ display data.
#[derive(Debug, Clone, Serialize)]
pub struct FaqView {
    pub question: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl From<Faq> for FaqView {
    fn from(faq: Faq) -> Self {
        Self {
            question: faq.question,
            answer: faq.answer,
            category: faq.category,
        }
    }
}

/// FAQ page response: questions plus the category facet for tab filtering.
#[derive(Debug, Serialize)]
pub struct FaqsView {
    pub faqs: Vec<FaqView>,
    pub categories: Vec<String>,
}

/// Testimonial display data.
#[derive(Debug, Clone, Serialize)]
pub struct TestimonialView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub rating: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl From<Testimonial> for TestimonialView {
    fn from(t: Testimonial) -> Self {
        Self {
            name: t.name,
            avatar: t.avatar,
            rating: t.rating,
            text: t.text,
            date: t.date,
        }
    }
}

/// Display the FAQ page.
///
/// GET /faqs
#[instrument(skip(state))]
pub async fn faqs(State(state): State<AppState>) -> Result<Json<FaqsView>> {
    let faqs = state.content().faqs();
    Ok(Json(FaqsView {
        categories: faq_categories(faqs),
        faqs: faqs.iter().cloned().map(FaqView::from).collect(),
    }))
}

/// Display all testimonials.
///
/// GET /testimonials
#[instrument(skip(state))]
pub async fn testimonials(State(state): State<AppState>) -> Result<Json<Vec<TestimonialView>>> {
    Ok(Json(
        state
            .content()
            .testimonials()
            .iter()
            .cloned()
            .map(TestimonialView::from)
            .collect(),
    ))
}
