//! In-Memory Billing Store Adapter
//!
//! Implements both `UserDirectory` and `SubscriptionRepository` in memory.
//! Useful for testing and local development without Supabase.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::billing::SubscriptionRecord;
use crate::domain::foundation::{Email, UserId};
use crate::ports::{StoreError, SubscriptionRepository, User, UserDirectory};

/// In-memory users and subscriptions, keyed like the real tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBillingStore {
    users: Arc<RwLock<Vec<User>>>,
    subscriptions: Arc<RwLock<HashMap<UserId, SubscriptionRecord>>>,
    writes: Arc<AtomicUsize>,
    fail_lookups: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryBillingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user
    pub async fn add_user(&self, id: UserId, email: Email) {
        self.users.write().await.push(User { id, email });
    }

    /// Make every lookup fail with `StoreError::Unavailable`
    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Make every upsert fail with `StoreError::Unavailable`
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of upserts attempted
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of stored subscription records
    pub async fn subscription_count(&self) -> usize {
        self.subscriptions.read().await.len()
    }
}

#[async_trait]
impl UserDirectory for InMemoryBillingStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("lookup failure injected".to_string()));
        }

        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == *email).cloned())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryBillingStore {
    async fn upsert(&self, record: &SubscriptionRecord) -> Result<SubscriptionRecord, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write failure injected".to_string()));
        }

        let mut subscriptions = self.subscriptions.write().await;
        let stored = match subscriptions.get(&record.user_id) {
            Some(existing) => SubscriptionRecord {
                created_at: existing.created_at,
                ..record.clone()
            },
            None => record.clone(),
        };
        subscriptions.insert(record.user_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<SubscriptionRecord>, StoreError> {
        Ok(self.subscriptions.read().await.get(user_id).cloned())
    }
}
