//! HandleStripeWebhookHandler - Verifies and records Stripe billing events.
//!
//! Stripe events are classified and logged; they do not change stored state.

use crate::domain::billing::{
    classify, Classification, RelevantEvent, StripeWebhookVerifier, WebhookError,
};

/// Command carrying the untouched request.
#[derive(Debug, Clone)]
pub struct HandleStripeWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Value of the `stripe-signature` header.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripeWebhookOutcome {
    pub event_id: String,
    pub event_type: String,
    pub classification: Classification,
}

/// Handler for Stripe webhooks.
pub struct HandleStripeWebhookHandler {
    verifier: StripeWebhookVerifier,
}

impl HandleStripeWebhookHandler {
    pub fn new(verifier: StripeWebhookVerifier) -> Self {
        Self { verifier }
    }

    pub fn handle(&self, cmd: HandleStripeWebhookCommand) -> Result<StripeWebhookOutcome, WebhookError> {
        let event = self
            .verifier
            .construct_event(&cmd.payload, cmd.signature.as_deref())
            .map_err(|e| {
                tracing::warn!(error = %e, "Stripe webhook rejected");
                e
            })?;

        let classification = classify(&event.event_type, None);

        match &classification {
            Classification::Relevant(RelevantEvent::Billing(kind)) => {
                tracing::info!(
                    event_id = %event.id,
                    event_type = %kind,
                    object_id = event.object_id().unwrap_or("-"),
                    livemode = event.livemode,
                    "Stripe billing event received"
                );
            }
            Classification::Relevant(other) => {
                tracing::info!(event_id = %event.id, event = ?other, "Stripe event received");
            }
            Classification::Ignored(reason) => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    reason = %reason,
                    "Stripe event ignored"
                );
            }
        }

        Ok(StripeWebhookOutcome {
            event_id: event.id,
            event_type: event.event_type,
            classification,
        })
    }
}
