//! Stripe webhook event types.
//!
//! Only the envelope fields needed for routing and logging are captured;
//! the event object stays as raw JSON.

use serde::{Deserialize, Serialize};

use super::event_kind::EventKind;

/// Stripe webhook event (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    pub id: String,

    /// Type of event (e.g., "invoice.paid").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    #[serde(default)]
    pub created: i64,

    /// Object containing event-specific data.
    #[serde(default)]
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    #[serde(default)]
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Parse the event type into a known kind.
    pub fn kind(&self) -> EventKind {
        EventKind::parse(&self.event_type)
    }

    /// Identifier of the Stripe object the event is about, if present.
    pub fn object_id(&self) -> Option<&str> {
        self.data.object.get("id").and_then(|v| v.as_str())
    }
}
