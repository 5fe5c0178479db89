//! Shared PostgREST client for the Supabase adapters.

use secrecy::{ExposeSecret, SecretString};

use crate::ports::StoreError;

/// Default table holding platform users.
pub const DEFAULT_USERS_TABLE: &str = "profiles";

/// Default table holding seller subscription records.
pub const DEFAULT_SUBSCRIPTIONS_TABLE: &str = "subscriptions";

/// Supabase connection settings.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    url: String,

    /// Service role key; bypasses row level security.
    service_key: SecretString,

    users_table: String,
    subscriptions_table: String,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            service_key: SecretString::new(service_key.into()),
            users_table: DEFAULT_USERS_TABLE.to_string(),
            subscriptions_table: DEFAULT_SUBSCRIPTIONS_TABLE.to_string(),
        }
    }

    pub fn with_users_table(mut self, table: impl Into<String>) -> Self {
        self.users_table = table.into();
        self
    }

    pub fn with_subscriptions_table(mut self, table: impl Into<String>) -> Self {
        self.subscriptions_table = table.into();
        self
    }
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("service_key", &"[REDACTED]")
            .field("users_table", &self.users_table)
            .field("subscriptions_table", &self.subscriptions_table)
            .finish()
    }
}

/// Thin wrapper over `reqwest::Client` that knows the PostgREST layout and
/// attaches the service credentials to every request.
#[derive(Clone)]
pub struct SupabaseClient {
    config: SupabaseConfig,
    http_client: reqwest::Client,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub(super) fn users_table(&self) -> &str {
        &self.config.users_table
    }

    pub(super) fn subscriptions_table(&self) -> &str {
        &self.config.subscriptions_table
    }

    /// Request builder for `{url}/rest/v1/{table}` with auth headers set.
    pub(super) fn table(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        let key = self.config.service_key.expose_secret();
        self.http_client
            .request(method, format!("{}/rest/v1/{}", self.config.url, table))
            .header("apikey", key.as_str())
            .bearer_auth(key)
    }

    /// Send a request and decode a JSON array of rows.
    pub(super) async fn fetch_rows<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &'static str,
    ) -> Result<Vec<T>, StoreError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, operation, "Supabase request failed");
            StoreError::Unavailable(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                error = %message,
                operation,
                "Supabase returned error"
            );
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}
