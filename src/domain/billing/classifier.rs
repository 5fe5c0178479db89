//! Event classification: decides whether a verified webhook matters.
//!
//! Classification is a pure function of the event type and payload. It never
//! touches storage; callers act on [`Classification::Relevant`] and
//! acknowledge [`Classification::Ignored`] with a 2xx.

use std::fmt;

use super::event_kind::EventKind;
use super::order::OrderPayload;
use crate::domain::foundation::Email;

/// Case-insensitive substrings identifying a seller/subscription product.
pub const SELLER_PRODUCT_KEYWORDS: [&str; 2] = ["seller", "subscription"];

/// Outcome of classifying an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Relevant(RelevantEvent),
    Ignored(IgnoreReason),
}

/// An event the service acts on or records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelevantEvent {
    /// A storefront order for a seller product; activates the buyer.
    SellerPurchase { kind: EventKind, customer_email: Email },
    /// A billing lifecycle event from the payment provider.
    Billing(EventKind),
}

/// Why an event was acknowledged without action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    UnrecognizedEventType(String),
    OrderStatusNotEligible(String),
    NoQualifyingProduct,
    MissingCustomerEmail,
    /// The customer email cannot identify anyone, so redelivery would never succeed.
    InvalidCustomerEmail(String),
    /// An order event arrived without an order body.
    MissingOrder,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedEventType(t) => write!(f, "unrecognized event type '{}'", t),
            Self::OrderStatusNotEligible(s) if s.is_empty() => {
                write!(f, "order status missing")
            }
            Self::OrderStatusNotEligible(s) => write!(f, "order status '{}' not eligible", s),
            Self::NoQualifyingProduct => write!(f, "no seller product in order"),
            Self::MissingCustomerEmail => write!(f, "order has no customer email"),
            Self::InvalidCustomerEmail(e) => write!(f, "customer email '{}' is not valid", e),
            Self::MissingOrder => write!(f, "order payload missing"),
        }
    }
}

impl Classification {
    pub fn is_relevant(&self) -> bool {
        matches!(self, Self::Relevant(_))
    }
}

/// Classifies an event by type and, for order events, by its payload.
pub fn classify(event_type: &str, order: Option<&OrderPayload>) -> Classification {
    let kind = EventKind::parse(event_type);

    if let EventKind::Unrecognized(raw) = &kind {
        return Classification::Ignored(IgnoreReason::UnrecognizedEventType(raw.clone()));
    }

    if !kind.is_order() {
        return Classification::Relevant(RelevantEvent::Billing(kind));
    }

    let Some(order) = order else {
        return Classification::Ignored(IgnoreReason::MissingOrder);
    };

    if !order.order_status.is_eligible() {
        let status: String = order.order_status.clone().into();
        return Classification::Ignored(IgnoreReason::OrderStatusNotEligible(status));
    }

    if !has_seller_product(order) {
        return Classification::Ignored(IgnoreReason::NoQualifyingProduct);
    }

    let raw_email = match order.customer_email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => email,
        _ => return Classification::Ignored(IgnoreReason::MissingCustomerEmail),
    };

    match Email::new(raw_email) {
        Ok(customer_email) => {
            Classification::Relevant(RelevantEvent::SellerPurchase { kind, customer_email })
        }
        Err(_) => {
            Classification::Ignored(IgnoreReason::InvalidCustomerEmail(raw_email.to_string()))
        }
    }
}

/// Classifies an order body using its own `eventType` field.
pub fn classify_order(order: &OrderPayload) -> Classification {
    classify(&order.event_type, Some(order))
}

fn has_seller_product(order: &OrderPayload) -> bool {
    order.line_items.iter().any(|item| {
        let name = item.product_name.to_lowercase();
        SELLER_PRODUCT_KEYWORDS.iter().any(|kw| name.contains(kw))
    })
}
