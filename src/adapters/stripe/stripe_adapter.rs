//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API using
//! form-encoded requests and HTTP basic auth with the secret key.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key);
//! let adapter = StripePaymentAdapter::new(config, http_client);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::Email;
use crate::ports::{
    CreateSubscriptionRequest, Customer, PaymentError, PaymentErrorCode, PaymentProvider,
    Subscription,
};

use super::api_types::{StripeCustomer, StripeErrorBody, StripeSubscription};

/// Default Stripe API origin.
pub const STRIPE_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: STRIPE_API_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

/// Stripe payment provider adapter.
///
/// Implements `PaymentProvider` for Stripe API integration.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter sharing the given HTTP client.
    ///
    /// Request timeouts come from the client.
    pub fn new(config: StripeConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        operation: &'static str,
    ) -> Result<T, PaymentError> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, operation, "Stripe request failed");
                PaymentError::network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                error = %error_text,
                operation,
                "Stripe API returned error"
            );
            return Err(map_error_response(status, &error_text));
        }

        response.json::<T>().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })
    }
}

/// Convert a non-2xx Stripe response into a `PaymentError`.
fn map_error_response(status: reqwest::StatusCode, body: &str) -> PaymentError {
    let parsed = serde_json::from_str::<StripeErrorBody>(body).ok();

    let message = parsed
        .as_ref()
        .and_then(|b| b.error.message.clone())
        .unwrap_or_else(|| format!("Stripe API error: {}", body));

    let code = match (status.as_u16(), parsed.as_ref().and_then(|b| b.error.error_type.as_deref())) {
        (401, _) => PaymentErrorCode::AuthenticationError,
        (429, _) => PaymentErrorCode::RateLimitExceeded,
        (_, Some("card_error")) | (402, _) => PaymentErrorCode::CardDeclined,
        (_, Some("invalid_request_error")) => PaymentErrorCode::InvalidRequest,
        _ => PaymentErrorCode::ProviderError,
    };

    let err = PaymentError::new(code, message);
    match parsed.and_then(|b| b.error.code) {
        Some(provider_code) => err.with_provider_code(provider_code),
        None => err,
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_customer(&self, email: &Email) -> Result<Customer, PaymentError> {
        let stripe_customer: StripeCustomer = self
            .post_form("/v1/customers", &[("email", email.as_str())], "create_customer")
            .await?;

        tracing::info!(customer_id = %stripe_customer.id, "Stripe customer created");

        Ok(Customer {
            id: stripe_customer.id,
            email: stripe_customer.email.or_else(|| Some(email.to_string())),
        })
    }

    async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<Subscription, PaymentError> {
        let params = [
            ("customer", request.customer_id.as_str()),
            ("items[0][price]", request.price_id.as_str()),
            ("payment_behavior", "default_incomplete"),
            ("expand[]", "latest_invoice.payment_intent"),
        ];

        let stripe_sub: StripeSubscription = self
            .post_form("/v1/subscriptions", &params, "create_subscription")
            .await?;

        let client_secret = stripe_sub.client_secret().map(str::to_string);
        if client_secret.is_none() {
            tracing::warn!(
                subscription_id = %stripe_sub.id,
                "Stripe subscription has no payment intent client secret"
            );
        }

        Ok(Subscription {
            id: stripe_sub.id,
            customer_id: stripe_sub.customer,
            status: stripe_sub.status,
            client_secret,
        })
    }
}
