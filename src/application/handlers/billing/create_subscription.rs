//! CreateSubscriptionHandler - Starts a Stripe subscription for checkout.

use std::sync::Arc;

use crate::domain::billing::{BillingError, PlanType};
use crate::domain::foundation::Email;
use crate::ports::{CreateSubscriptionRequest, PaymentError, PaymentProvider};

/// Price ids per plan, as configured. Either may be absent.
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    pub monthly: Option<String>,
    pub yearly: Option<String>,
}

impl PriceCatalog {
    pub fn new(monthly: Option<String>, yearly: Option<String>) -> Self {
        Self { monthly, yearly }
    }

    /// Configured price id for `plan`, ignoring blank values.
    pub fn price_for(&self, plan: PlanType) -> Option<&str> {
        let price = match plan {
            PlanType::Monthly => self.monthly.as_deref(),
            PlanType::Yearly => self.yearly.as_deref(),
        };
        price.map(str::trim).filter(|p| !p.is_empty())
    }
}

/// Raw checkout request fields, unvalidated.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub email: Option<String>,
    pub plan_type: Option<String>,
}

/// Data the client needs to confirm the first payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSubscriptionResult {
    pub client_secret: String,
    pub subscription_id: String,
}

/// Handler for checkout subscription creation.
///
/// Validates input before any provider call, then creates the customer and
/// an incomplete subscription on the plan's price.
pub struct CreateSubscriptionHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    prices: PriceCatalog,
}

impl CreateSubscriptionHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, prices: PriceCatalog) -> Self {
        Self {
            payment_provider,
            prices,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<CreateSubscriptionResult, BillingError> {
        let email = cmd
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| BillingError::validation("email", "Email is required"))
            .and_then(|e| {
                Email::new(e).map_err(|_| BillingError::validation("email", "Invalid email address"))
            })?;

        let plan = cmd
            .plan_type
            .as_deref()
            .and_then(|p| p.parse::<PlanType>().ok())
            .ok_or_else(|| BillingError::validation("planType", "Invalid plan type"))?;

        let price_id = self.prices.price_for(plan).ok_or_else(|| {
            tracing::error!(plan = %plan, "Price id not configured");
            BillingError::configuration("Price ID is missing in environment variables")
        })?;

        let customer = self
            .payment_provider
            .create_customer(&email)
            .await
            .map_err(|e| provider_failure(e, "create_customer"))?;

        let subscription = self
            .payment_provider
            .create_subscription(CreateSubscriptionRequest {
                customer_id: customer.id.clone(),
                price_id: price_id.to_string(),
            })
            .await
            .map_err(|e| provider_failure(e, "create_subscription"))?;

        let Some(client_secret) = subscription
            .client_secret
            .filter(|secret| !secret.trim().is_empty())
        else {
            tracing::error!(
                customer_id = %customer.id,
                subscription_id = %subscription.id,
                status = %subscription.status,
                "Subscription has no payment intent client secret"
            );
            return Err(BillingError::upstream(
                "Subscription is missing a payment confirmation secret",
            )
            .with_details("missing_client_secret"));
        };

        tracing::info!(
            customer_id = %customer.id,
            subscription_id = %subscription.id,
            plan = %plan,
            "Subscription created"
        );

        Ok(CreateSubscriptionResult {
            client_secret,
            subscription_id: subscription.id,
        })
    }
}

fn provider_failure(err: PaymentError, operation: &'static str) -> BillingError {
    tracing::error!(error = %err, operation, "Stripe call failed");
    BillingError::upstream(err.message.clone()).with_details(err.code.to_string())
}
