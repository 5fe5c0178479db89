//! Stripe REST API response types.
//!
//! Only the fields the service reads are modelled; everything else in the
//! payloads is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// A field Stripe returns either as an id or, when requested via
/// `expand[]`, as the full object.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Expandable<T> {
    Object(Box<T>),
    Id(String),
}

impl<T> Expandable<T> {
    /// The expanded object, if Stripe returned one.
    pub fn as_object(&self) -> Option<&T> {
        match self {
            Expandable::Object(obj) => Some(obj),
            Expandable::Id(_) => None,
        }
    }
}

/// Stripe Customer object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCustomer {
    /// Unique customer identifier (cus_...).
    pub id: String,

    /// Customer email address.
    pub email: Option<String>,

    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: i64,
}

/// Stripe Subscription object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeSubscription {
    /// Unique subscription identifier (sub_...).
    pub id: String,

    /// Customer ID owning this subscription.
    pub customer: String,

    /// Subscription status (`incomplete` for new default_incomplete subs).
    pub status: String,

    /// First invoice; expanded when created with
    /// `expand[]=latest_invoice.payment_intent`.
    #[serde(default)]
    pub latest_invoice: Option<Expandable<StripeInvoice>>,
}

impl StripeSubscription {
    /// Client secret of the first invoice's payment intent, when expanded.
    pub fn client_secret(&self) -> Option<&str> {
        self.latest_invoice
            .as_ref()?
            .as_object()?
            .payment_intent
            .as_ref()?
            .as_object()?
            .client_secret
            .as_deref()
    }
}

/// Stripe Invoice object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeInvoice {
    /// Unique invoice identifier (in_...).
    pub id: String,

    /// Payment intent collecting this invoice.
    #[serde(default)]
    pub payment_intent: Option<Expandable<StripePaymentIntent>>,
}

/// Stripe PaymentIntent object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePaymentIntent {
    /// Unique payment intent identifier (pi_...).
    pub id: String,

    /// Secret handed to the client to confirm payment.
    pub client_secret: Option<String>,
}

/// Error envelope returned by Stripe on non-2xx responses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeErrorBody {
    pub error: StripeApiError,
}

/// Error detail inside [`StripeErrorBody`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeApiError {
    /// Error category, e.g. `card_error` or `invalid_request_error`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,

    /// Machine-readable code, e.g. `resource_missing`.
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}
