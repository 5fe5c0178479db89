//! Billing error taxonomy.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | Authentication | 401 |
//! | NotFound | 404 |
//! | Configuration | 500 |
//! | Upstream | 500 |
//!
//! Irrelevant events are not errors; see `Classification::Ignored`.

use thiserror::Error;

use crate::domain::foundation::Email;

/// Errors surfaced by billing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Missing or invalid request field.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// Bad or missing webhook signature.
    #[error("{0}")]
    Authentication(String),

    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Required server-side setting is absent.
    #[error("{0}")]
    Configuration(String),

    /// A remote provider or store call failed.
    #[error("{message}")]
    Upstream {
        message: String,
        details: Option<String>,
    },
}

impl BillingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        BillingError::Authentication(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        BillingError::NotFound(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        BillingError::Configuration(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        BillingError::Upstream {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(self, details: impl Into<String>) -> Self {
        match self {
            BillingError::Upstream { message, .. } => BillingError::Upstream {
                message,
                details: Some(details.into()),
            },
            other => other,
        }
    }
}

/// Failure modes of seller subscription activation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivationError {
    /// No user with this exact email. Terminal: redelivery cannot fix it.
    #[error("User not found")]
    NotFound(Email),

    /// Lookup or upsert failed in the store.
    #[error("Failed to activate subscription: {0}")]
    PersistenceFailure(String),
}

impl From<ActivationError> for BillingError {
    fn from(err: ActivationError) -> Self {
        match err {
            ActivationError::NotFound(_) => BillingError::not_found("User not found"),
            ActivationError::PersistenceFailure(_) => {
                BillingError::upstream("Failed to activate subscription")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_displays_message_only() {
        let err = BillingError::validation("email", "Email is required");
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn with_details_only_applies_to_upstream() {
        let err = BillingError::upstream("Stripe failed").with_details("card_declined");
        assert_eq!(
            err,
            BillingError::Upstream {
                message: "Stripe failed".to_string(),
                details: Some("card_declined".to_string()),
            }
        );

        let err = BillingError::not_found("gone").with_details("ignored");
        assert_eq!(err, BillingError::NotFound("gone".to_string()));
    }

    #[test]
    fn activation_not_found_maps_to_not_found() {
        let email = Email::new("a@b.com").unwrap();
        let err: BillingError = ActivationError::NotFound(email).into();
        assert_eq!(err, BillingError::NotFound("User not found".to_string()));
    }

    #[test]
    fn activation_persistence_failure_hides_store_detail() {
        let err: BillingError = ActivationError::PersistenceFailure("timeout".to_string()).into();
        assert_eq!(err, BillingError::upstream("Failed to activate subscription"));
    }
}
