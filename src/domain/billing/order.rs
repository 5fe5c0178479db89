//! Storefront order webhook payload (Squarespace-style).

use serde::{Deserialize, Serialize};

/// Order notification body.
///
/// Only the fields used for classification are captured; everything else in
/// the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Event type, e.g. `order.create`.
    #[serde(default, alias = "topic")]
    pub event_type: String,

    #[serde(default)]
    pub customer_email: Option<String>,

    #[serde(default)]
    pub line_items: Vec<LineItem>,

    #[serde(default)]
    pub order_status: OrderStatus,
}

/// A purchased product within an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub product_name: String,
}

/// Fulfillment state of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum OrderStatus {
    PendingFulfillment,
    Fulfilled,
    /// Any other status (canceled, refunded, ...), kept verbatim.
    Other(String),
    #[default]
    Missing,
}

impl OrderStatus {
    /// Statuses that entitle the buyer to a seller account.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::PendingFulfillment | Self::Fulfilled)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING_FULFILLMENT" => Self::PendingFulfillment,
            "FULFILLED" => Self::Fulfilled,
            "" => Self::Missing,
            _ => Self::Other(s),
        }
    }
}

impl From<Option<String>> for OrderStatus {
    fn from(s: Option<String>) -> Self {
        s.map(Self::from).unwrap_or(Self::Missing)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::PendingFulfillment => "PENDING_FULFILLMENT".to_string(),
            OrderStatus::Fulfilled => "FULFILLED".to_string(),
            OrderStatus::Other(s) => s,
            OrderStatus::Missing => String::new(),
        }
    }
}
