//! User directory port (read side).
//!
//! Resolves a buyer email to a platform user. Lookup is exact: the stored
//! email must equal the given one, case included.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Email, UserId};

use super::StoreError;

/// A platform user as seen by billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
}

/// Reader port for user lookup by email.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find the user whose email equals `email` exactly.
    ///
    /// Returns `None` if no user matches.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError>;
}
