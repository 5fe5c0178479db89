//! HandleSquarespaceWebhookHandler - Verifies a storefront order webhook and
//! activates the buyer's seller subscription when the order qualifies.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::billing::{
    classify, signature, BillingError, Classification, OrderPayload, RelevantEvent,
};

use super::activate_seller_subscription::{
    ActivateSellerSubscriptionCommand, ActivateSellerSubscriptionHandler, ActivationResult,
};

/// Command carrying the untouched request.
#[derive(Debug, Clone)]
pub struct HandleSquarespaceWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Value of the `x-squarespace-signature` header.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone)]
pub enum SquarespaceWebhookOutcome {
    /// Seller plan granted to the buyer.
    Activated(ActivationResult),
    /// Verified but not actionable; acknowledged with 2xx.
    Ignored { event_type: String, reason: String },
}

/// Handler for storefront order webhooks.
pub struct HandleSquarespaceWebhookHandler {
    secret: SecretString,
    activator: Arc<ActivateSellerSubscriptionHandler>,
}

impl HandleSquarespaceWebhookHandler {
    pub fn new(secret: SecretString, activator: Arc<ActivateSellerSubscriptionHandler>) -> Self {
        Self { secret, activator }
    }

    pub async fn handle(
        &self,
        cmd: HandleSquarespaceWebhookCommand,
    ) -> Result<SquarespaceWebhookOutcome, BillingError> {
        // 1. Authenticate against the raw bytes
        if !signature::verify(
            &cmd.payload,
            cmd.signature.as_deref(),
            self.secret.expose_secret(),
        ) {
            tracing::warn!(
                has_signature = cmd.signature.is_some(),
                body_len = cmd.payload.len(),
                "Squarespace webhook signature rejected"
            );
            return Err(BillingError::authentication("Invalid signature"));
        }

        // 2. Parse
        let order: OrderPayload = serde_json::from_slice(&cmd.payload).map_err(|e| {
            tracing::warn!(error = %e, "Squarespace webhook body is not a valid order payload");
            BillingError::validation("body", format!("Invalid payload: {}", e))
        })?;

        // 3. Classify
        let email = match classify(&order.event_type, Some(&order)) {
            Classification::Relevant(RelevantEvent::SellerPurchase { customer_email, .. }) => {
                customer_email
            }
            Classification::Relevant(RelevantEvent::Billing(kind)) => {
                return Ok(ignored(
                    &order.event_type,
                    format!("event type '{}' not handled by this endpoint", kind),
                ));
            }
            Classification::Ignored(reason) => {
                return Ok(ignored(&order.event_type, reason.to_string()));
            }
        };

        tracing::info!(
            event_type = %order.event_type,
            email = %email,
            "Qualifying seller purchase received"
        );

        // 4. Activate
        let result = self
            .activator
            .handle(ActivateSellerSubscriptionCommand { email })
            .await?;

        Ok(SquarespaceWebhookOutcome::Activated(result))
    }
}

fn ignored(event_type: &str, reason: String) -> SquarespaceWebhookOutcome {
    tracing::info!(event_type, reason = %reason, "Squarespace webhook ignored");
    SquarespaceWebhookOutcome::Ignored {
        event_type: event_type.to_string(),
        reason,
    }
}
