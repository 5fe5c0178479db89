//! Subscription repository port (write side).
//!
//! # Design
//!
//! - **Unique constraint**: At most one record per user
//! - **Upsert**: Writing an existing user's record replaces its fields,
//!   keeping the original `created_at`

use async_trait::async_trait;

use crate::domain::billing::SubscriptionRecord;
use crate::domain::foundation::UserId;

use super::StoreError;

/// Repository port for seller subscription records.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert or update the record keyed by `record.user_id`.
    ///
    /// Returns the record as stored.
    async fn upsert(&self, record: &SubscriptionRecord) -> Result<SubscriptionRecord, StoreError>;

    /// Find the record for a user.
    ///
    /// Returns `None` if the user has never been activated.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionRecord>, StoreError>;
}
