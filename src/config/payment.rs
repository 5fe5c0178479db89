//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Stripe and storefront webhooks)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    #[serde(default)]
    pub stripe_secret_key: String,

    /// Stripe webhook signing secret
    #[serde(default)]
    pub stripe_webhook_secret: String,

    /// Stripe price ID for the monthly plan
    #[serde(default)]
    pub monthly_price_id: Option<String>,

    /// Stripe price ID for the yearly plan
    #[serde(default)]
    pub yearly_price_id: Option<String>,

    /// Shared secret for `x-squarespace-signature`
    #[serde(default)]
    pub squarespace_webhook_secret: String,

    /// Stripe API origin
    #[serde(default = "default_stripe_api_base_url")]
    pub stripe_api_base_url: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: String::new(),
            stripe_webhook_secret: String::new(),
            monthly_price_id: None,
            yearly_price_id: None,
            squarespace_webhook_secret: String::new(),
            stripe_api_base_url: default_stripe_api_base_url(),
        }
    }
}

fn default_stripe_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key.starts_with("sk_test_")
    }

    /// Validate payment configuration
    ///
    /// Price ids may be absent; checkout reports that per request.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"));
        }
        if self.stripe_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
        }
        if self.squarespace_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("SQUARESPACE_WEBHOOK_SECRET"));
        }

        // Verify key prefixes for safety
        if !(self.stripe_secret_key.starts_with("sk_") || self.stripe_secret_key.starts_with("rk_"))
        {
            return Err(ValidationError::InvalidStripeKey);
        }
        if !self.stripe_webhook_secret.starts_with("whsec_") {
            return Err(ValidationError::InvalidStripeWebhookSecret);
        }

        Ok(())
    }
}
