//! Contact form route handlers.
//!
//! Submissions are validated here before anything touches the network, so
//! a malformed form never costs a store round-trip.

use aristo_weaves_core::Email;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A validated contact submission ready to store.
#[derive(Debug)]
struct ValidContact {
    name: String,
    email: Email,
    message: String,
}

fn validate(form: &ContactForm) -> Result<ValidContact, &'static str> {
    let name = form.name.trim();
    let message = form.message.trim();
    if name.is_empty() || message.is_empty() || form.email.trim().is_empty() {
        return Err("Name, email and message are all required.");
    }
    let email =
        Email::parse(&form.email).map_err(|_| "Please enter a valid email address.")?;
    Ok(ValidContact {
        name: name.to_owned(),
        email,
        message: message.to_owned(),
    })
}

/// Submit the contact form.
///
/// POST /contact
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> impl IntoResponse {
    let contact = match validate(&form) {
        Ok(c) => c,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ContactResponse {
                    success: false,
                    message: Some(message.to_string()),
                }),
            );
        }
    };

    match state
        .store()
        .submit_contact(&contact.name, &contact.email, &contact.message)
        .await
    {
        Ok(submission) => {
            tracing::info!(id = %submission.id, "Contact submission stored");
            (
                StatusCode::OK,
                Json(ContactResponse {
                    success: true,
                    message: Some(
                        "Thank you for your message! We'll get back to you soon.".to_string(),
                    ),
                }),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store contact submission");
            (
                StatusCode::BAD_GATEWAY,
                Json(ContactResponse {
                    success: false,
                    message: Some("Something went wrong. Please try again.".to_string()),
                }),
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_owned(),
            email: email.to_owned(),
            message: message.to_owned(),
        }
    }

    #[test]
    fn valid_form_passes_and_is_trimmed() {
        let valid = validate(&form("  Jane  ", "Jane@Example.com", " Hello ")).unwrap();
        assert_eq!(valid.name, "Jane");
        assert_eq!(valid.email.as_str(), "jane@example.com");
        assert_eq!(valid.message, "Hello");
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(validate(&form("", "a@b.com", "hi")).is_err());
        assert!(validate(&form("Jane", "", "hi")).is_err());
        assert!(validate(&form("Jane", "a@b.com", "   ")).is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        assert!(validate(&form("Jane", "not-an-email", "hi")).is_err());
        assert!(validate(&form("Jane", "jane@domain", "hi")).is_err());
    }
}
