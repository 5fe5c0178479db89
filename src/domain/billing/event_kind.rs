//! Closed set of provider event types this service recognizes.

use std::fmt;

/// Recognized webhook event types across providers.
///
/// Matching on raw strings happens only in [`EventKind::parse`]; everything
/// downstream works with the enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Storefront order placed (`order.create`).
    OrderCreated,
    /// Storefront order changed, e.g. fulfilled (`order.update`).
    OrderUpdated,
    /// `customer.subscription.created`
    SubscriptionCreated,
    /// `customer.subscription.updated`
    SubscriptionUpdated,
    /// `customer.subscription.deleted`
    SubscriptionDeleted,
    /// `invoice.paid`
    InvoicePaid,
    /// `invoice.payment_failed`
    InvoicePaymentFailed,
    /// `checkout.session.completed`
    CheckoutSessionCompleted,
    /// Anything else, kept verbatim for logging.
    Unrecognized(String),
}

impl EventKind {
    /// Parse a provider event type string.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "order.create" => Self::OrderCreated,
            "order.update" => Self::OrderUpdated,
            "customer.subscription.created" => Self::SubscriptionCreated,
            "customer.subscription.updated" => Self::SubscriptionUpdated,
            "customer.subscription.deleted" => Self::SubscriptionDeleted,
            "invoice.paid" => Self::InvoicePaid,
            "invoice.payment_failed" => Self::InvoicePaymentFailed,
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Convert back to the provider's event type string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::OrderCreated => "order.create",
            Self::OrderUpdated => "order.update",
            Self::SubscriptionCreated => "customer.subscription.created",
            Self::SubscriptionUpdated => "customer.subscription.updated",
            Self::SubscriptionDeleted => "customer.subscription.deleted",
            Self::InvoicePaid => "invoice.paid",
            Self::InvoicePaymentFailed => "invoice.payment_failed",
            Self::CheckoutSessionCompleted => "checkout.session.completed",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// True for storefront order events, which carry an order payload.
    pub fn is_order(&self) -> bool {
        matches!(self, Self::OrderCreated | Self::OrderUpdated)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
