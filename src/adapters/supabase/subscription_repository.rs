//! `SubscriptionRepository` backed by a Supabase subscriptions table.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::billing::{SubscriptionRecord, SubscriptionStatus};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{StoreError, SubscriptionRepository};

use super::client::SupabaseClient;

/// Columns written on upsert. `created_at` is omitted so the column default
/// applies on insert and the stored value survives a merge.
#[derive(Debug, Serialize)]
struct UpsertRow<'a> {
    user_id: &'a UserId,
    status: SubscriptionStatus,
    plan_id: &'a str,
    current_period_start: Timestamp,
    current_period_end: Timestamp,
    updated_at: Timestamp,
}

impl<'a> From<&'a SubscriptionRecord> for UpsertRow<'a> {
    fn from(record: &'a SubscriptionRecord) -> Self {
        Self {
            user_id: &record.user_id,
            status: record.status,
            plan_id: &record.plan_id,
            current_period_start: record.current_period_start,
            current_period_end: record.current_period_end,
            updated_at: record.updated_at,
        }
    }
}

pub struct SupabaseSubscriptionRepository {
    client: SupabaseClient,
}

impl SupabaseSubscriptionRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubscriptionRepository for SupabaseSubscriptionRepository {
    async fn upsert(&self, record: &SubscriptionRecord) -> Result<SubscriptionRecord, StoreError> {
        let request = self
            .client
            .table(reqwest::Method::POST, self.client.subscriptions_table())
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&[UpsertRow::from(record)]);

        let rows: Vec<SubscriptionRecord> =
            self.client.fetch_rows(request, "upsert_subscription").await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("upsert returned no rows".to_string()))
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionRecord>, StoreError> {
        let request = self
            .client
            .table(reqwest::Method::GET, self.client.subscriptions_table())
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", user_id)),
                ("limit", "1".to_string()),
            ]);

        let rows: Vec<SubscriptionRecord> = self
            .client
            .fetch_rows(request, "find_subscription_by_user")
            .await?;

        Ok(rows.into_iter().next())
    }
}
