//! HTTP DTOs (Data Transfer Objects) for billing endpoints.
//!
//! These types define the JSON request/response structure for checkout and
//! webhook endpoints. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::application::billing::{ActivationResult, CreateSubscriptionResult};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a checkout subscription.
///
/// Both fields are optional here so that absence is reported with the
/// service's own error messages instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plan_type: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response after creating a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionResponse {
    pub client_secret: String,
    pub subscription_id: String,
}

impl From<CreateSubscriptionResult> for CreateSubscriptionResponse {
    fn from(result: CreateSubscriptionResult) -> Self {
        Self {
            client_secret: result.client_secret,
            subscription_id: result.subscription_id,
        }
    }
}

/// Acknowledgement for an accepted Stripe webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookReceivedResponse {
    pub received: bool,
}

/// Response after activating a seller subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerActivatedResponse {
    pub message: String,
    pub user_id: String,
    pub email: String,
}

impl From<ActivationResult> for SellerActivatedResponse {
    fn from(result: ActivationResult) -> Self {
        Self {
            message: "Seller subscription activated".to_string(),
            user_id: result.user_id.to_string(),
            email: result.email.to_string(),
        }
    }
}

/// Acknowledgement for a verified webhook that required no action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventIgnoredResponse {
    pub message: String,
    pub reason: String,
}

impl EventIgnoredResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            message: "Event ignored".to_string(),
            reason: reason.into(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
