//! Supabase configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Supabase (PostgREST) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL
    #[serde(default)]
    pub url: String,

    /// Service role key
    #[serde(default)]
    pub service_role_key: String,

    /// Table holding users (`id`, `email`)
    #[serde(default = "default_users_table")]
    pub users_table: String,

    /// Table holding seller subscription records
    #[serde(default = "default_subscriptions_table")]
    pub subscriptions_table: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            service_role_key: String::new(),
            users_table: default_users_table(),
            subscriptions_table: default_subscriptions_table(),
        }
    }
}

fn default_users_table() -> String {
    "profiles".to_string()
}

fn default_subscriptions_table() -> String {
    "subscriptions".to_string()
}

impl SupabaseConfig {
    /// Validate Supabase configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_URL"));
        }
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(ValidationError::InvalidSupabaseUrl);
        }
        if self.service_role_key.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_SERVICE_ROLE_KEY"));
        }
        if self.users_table.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE users_table"));
        }
        if self.subscriptions_table.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE subscriptions_table"));
        }
        Ok(())
    }
}
