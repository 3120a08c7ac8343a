//! Newsletter subscription route handlers.
//!
//! Subscribing upserts on the email's unique constraint, so re-subscribing
//! never duplicates a record. Unsubscribing flips the flag and is a no-op
//! for unknown addresses.

use aristo_weaves_core::Email;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;

/// Newsletter form data.
#[derive(Debug, Deserialize)]
pub struct NewsletterForm {
    pub email: String,
}

/// Response for newsletter operations.
#[derive(Debug, Serialize)]
pub struct NewsletterResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn invalid_email() -> (StatusCode, Json<NewsletterResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(NewsletterResponse {
            success: false,
            message: Some("Please enter a valid email address.".to_string()),
        }),
    )
}

/// Subscribe to the newsletter.
///
/// POST /newsletter/subscribe
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(form): Json<NewsletterForm>,
) -> impl IntoResponse {
    let Ok(email) = Email::parse(&form.email) else {
        return invalid_email();
    };

    match state.store().subscribe_newsletter(&email).await {
        Ok(subscription) => {
            tracing::info!(id = %subscription.id, "Newsletter subscription stored");
            (
                StatusCode::OK,
                Json(NewsletterResponse {
                    success: true,
                    message: Some("Thank you for subscribing!".to_string()),
                }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Newsletter subscription failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(NewsletterResponse {
                    success: false,
                    message: Some("Something went wrong. Please try again.".to_string()),
                }),
            )
        }
    }
}

/// Unsubscribe from the newsletter.
///
/// POST /newsletter/unsubscribe
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(form): Json<NewsletterForm>,
) -> impl IntoResponse {
    let Ok(email) = Email::parse(&form.email) else {
        return invalid_email();
    };

    match state.store().unsubscribe_newsletter(&email).await {
        Ok(()) => (
            StatusCode::OK,
            Json(NewsletterResponse {
                success: true,
                message: Some("You have been unsubscribed.".to_string()),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Newsletter unsubscribe failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(NewsletterResponse {
                    success: false,
                    message: Some("Something went wrong. Please try again.".to_string()),
                }),
            )
        }
    }
}
