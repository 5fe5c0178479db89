//! Billing domain: webhook authenticity, event classification and the
//! seller subscription record.

pub mod classifier;
pub mod errors;
pub mod event_kind;
pub mod order;
pub mod plan;
pub mod signature;
pub mod stripe_event;
pub mod subscription;
pub mod webhook_errors;
pub mod webhook_verifier;

pub use classifier::{classify, classify_order, Classification, IgnoreReason, RelevantEvent};
pub use errors::{ActivationError, BillingError};
pub use event_kind::EventKind;
pub use order::{LineItem, OrderPayload, OrderStatus};
pub use plan::PlanType;
pub use stripe_event::{StripeEvent, StripeEventData};
pub use subscription::{
    SubscriptionRecord, SubscriptionStatus, ACTIVATION_PERIOD_DAYS, SELLER_PLAN_ID,
};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{stripe_signature_header, SignatureHeader, StripeWebhookVerifier};
