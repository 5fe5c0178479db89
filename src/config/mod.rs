//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MINGMING` prefix and nested values use double underscores as separators.
//! The plain deployment names (`PORT`, `STRIPE_SECRET_KEY`, ...) are honored
//! too and take precedence.
//!
//! # Example
//!
//! ```no_run
//! use mingming_billing::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on port {}", config.server.port);
//! ```

mod error;
mod payment;
mod server;
mod supabase;

pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};
pub use supabase::SupabaseConfig;

use serde::Deserialize;

/// Plain environment names mapped onto their configuration keys.
const PLAIN_ENV_OVERRIDES: [(&str, &str); 8] = [
    ("PORT", "server.port"),
    ("STRIPE_SECRET_KEY", "payment.stripe_secret_key"),
    ("STRIPE_WEBHOOK_SECRET", "payment.stripe_webhook_secret"),
    ("MONTHLY_PRICE_ID", "payment.monthly_price_id"),
    ("YEARLY_PRICE_ID", "payment.yearly_price_id"),
    ("SQUARESPACE_WEBHOOK_SECRET", "payment.squarespace_webhook_secret"),
    ("SUPABASE_URL", "supabase.url"),
    ("SUPABASE_SERVICE_ROLE_KEY", "supabase.service_role_key"),
];

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Payment configuration (Stripe, Squarespace)
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Persistence configuration (Supabase)
    #[serde(default)]
    pub supabase: SupabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MINGMING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies the plain deployment names on top
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MINGMING__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MINGMING__SUPABASE__USERS_TABLE=users` -> `supabase.users_table = users`
    /// - `STRIPE_SECRET_KEY=sk_...` -> `payment.stripe_secret_key = sk_...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder().add_source(
            config::Environment::default()
                .prefix("MINGMING")
                .separator("__"),
        );

        for (var, key) in PLAIN_ENV_OVERRIDES {
            let value = std::env::var(var).ok().filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(key, value)?;
        }

        let config = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.payment.validate()?;
        self.supabase.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const PREFIXED: [&str; 6] = [
        "MINGMING__PAYMENT__STRIPE_SECRET_KEY",
        "MINGMING__PAYMENT__STRIPE_WEBHOOK_SECRET",
        "MINGMING__PAYMENT__SQUARESPACE_WEBHOOK_SECRET",
        "MINGMING__SUPABASE__URL",
        "MINGMING__SUPABASE__SERVICE_ROLE_KEY",
        "MINGMING__SERVER__PORT",
    ];

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("MINGMING__PAYMENT__STRIPE_SECRET_KEY", "sk_test_xxx");
        env::set_var("MINGMING__PAYMENT__STRIPE_WEBHOOK_SECRET", "whsec_xxx");
        env::set_var("MINGMING__PAYMENT__SQUARESPACE_WEBHOOK_SECRET", "sq_xxx");
        env::set_var("MINGMING__SUPABASE__URL", "https://xyz.supabase.co");
        env::set_var("MINGMING__SUPABASE__SERVICE_ROLE_KEY", "service-key");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in PREFIXED {
            env::remove_var(var);
        }
        for (var, _) in PLAIN_ENV_OVERRIDES {
            env::remove_var(var);
        }
        env::remove_var("MINGMING__SERVER__ENVIRONMENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.stripe_secret_key, "sk_test_xxx");
        assert_eq!(config.supabase.url, "https://xyz.supabase.co");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 10000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.supabase.users_table, "profiles");
        assert!(config.payment.monthly_price_id.is_none());
    }

    #[test]
    fn test_plain_names_override_prefixed() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();
        env::set_var("MINGMING__SERVER__PORT", "3000");
        env::set_var("PORT", "4000");
        env::set_var("STRIPE_SECRET_KEY", "sk_live_plain");
        env::set_var("MONTHLY_PRICE_ID", "price_monthly");
        env::set_var("YEARLY_PRICE_ID", "price_yearly");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.payment.stripe_secret_key, "sk_live_plain");
        assert_eq!(config.payment.monthly_price_id.as_deref(), Some("price_monthly"));
        assert_eq!(config.payment.yearly_price_id.as_deref(), Some("price_yearly"));
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();
        env::set_var("MINGMING__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_validate_reports_missing_secret() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"))
        );
    }
}
