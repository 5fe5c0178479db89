//! Seller subscription record mirrored into the persistence store.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

/// Plan identifier granted on confirmed seller purchase.
pub const SELLER_PLAN_ID: &str = "seller_account";

/// Length of one activation period. Re-activation restarts it from now.
pub const ACTIVATION_PERIOD_DAYS: i64 = 30;

/// Status of a subscription record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Canceled,
}

/// One row per user; the store enforces uniqueness on `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub user_id: UserId,
    pub status: SubscriptionStatus,
    pub plan_id: String,
    pub current_period_start: Timestamp,
    pub current_period_end: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SubscriptionRecord {
    /// Builds the record written when a seller purchase is confirmed at `now`.
    ///
    /// `created_at` is only kept by the store on first insert.
    pub fn activated(user_id: UserId, now: Timestamp) -> Self {
        Self {
            user_id,
            status: SubscriptionStatus::Active,
            plan_id: SELLER_PLAN_ID.to_string(),
            current_period_start: now,
            current_period_end: now.add_days(ACTIVATION_PERIOD_DAYS),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}
