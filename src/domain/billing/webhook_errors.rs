//! Error types for Stripe webhook verification.
//!
//! Every variant is a caller-side failure: the HTTP layer answers all of them
//! with 400 and a `Webhook Error: <reason>` body, so Stripe does not treat a
//! forged or stale delivery as a server outage.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while constructing a verified Stripe event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// No `Stripe-Signature` header was sent.
    #[error("No stripe-signature header value was provided.")]
    MissingHeader,

    /// The signing secret is not configured.
    #[error("Webhook signing secret is not configured")]
    MissingSecret,

    /// The header could not be split into a timestamp and signatures.
    #[error("Unable to extract timestamp and signatures from header")]
    MalformedHeader,

    /// No `v1` signature matched the payload.
    #[error("No signatures found matching the expected signature for payload")]
    InvalidSignature,

    /// Event timestamp is outside the tolerance window.
    #[error("Timestamp outside the tolerance zone")]
    TimestampOutOfRange,

    /// Signature matched but the body is not a Stripe event.
    #[error("Invalid payload: {0}")]
    ParseError(String),
}

impl WebhookError {
    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Body text returned to the sender.
    pub fn response_text(&self) -> String {
        format!("Webhook Error: {}", self)
    }
}
