//! ActivateSellerSubscriptionHandler - Grants the seller plan to the user
//! owning a buyer email.

use std::sync::Arc;

use crate::domain::billing::{ActivationError, SubscriptionRecord};
use crate::domain::foundation::{Email, Timestamp, UserId};
use crate::ports::{SubscriptionRepository, UserDirectory};

/// Command to activate the seller plan for a buyer.
#[derive(Debug, Clone)]
pub struct ActivateSellerSubscriptionCommand {
    pub email: Email,
}

/// Result of a successful activation.
#[derive(Debug, Clone)]
pub struct ActivationResult {
    pub user_id: UserId,
    pub email: Email,
    pub subscription: SubscriptionRecord,
}

/// Handler for seller subscription activation.
///
/// Looks the user up by exact email and upserts a fresh 30-day record.
/// Unknown users fail closed without any write.
pub struct ActivateSellerSubscriptionHandler {
    users: Arc<dyn UserDirectory>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl ActivateSellerSubscriptionHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            users,
            subscriptions,
        }
    }

    pub async fn handle(
        &self,
        cmd: ActivateSellerSubscriptionCommand,
    ) -> Result<ActivationResult, ActivationError> {
        self.handle_at(cmd, Timestamp::now()).await
    }

    async fn handle_at(
        &self,
        cmd: ActivateSellerSubscriptionCommand,
        now: Timestamp,
    ) -> Result<ActivationResult, ActivationError> {
        let email = cmd.email;

        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(|e| {
                tracing::error!(email = %email, error = %e, "User lookup failed");
                ActivationError::PersistenceFailure(e.to_string())
            })?
            .ok_or_else(|| {
                tracing::warn!(email = %email, "No user found for buyer email");
                ActivationError::NotFound(email.clone())
            })?;

        let record = SubscriptionRecord::activated(user.id.clone(), now);

        let subscription = self.subscriptions.upsert(&record).await.map_err(|e| {
            tracing::error!(
                email = %email,
                user_id = %user.id,
                error = %e,
                "Subscription upsert failed"
            );
            ActivationError::PersistenceFailure(e.to_string())
        })?;

        tracing::info!(
            email = %email,
            user_id = %user.id,
            period_end = %subscription.current_period_end.as_datetime(),
            "Seller subscription activated"
        );

        Ok(ActivationResult {
            user_id: user.id,
            email,
            subscription,
        })
    }
}
