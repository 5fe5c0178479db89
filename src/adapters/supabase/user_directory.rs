//! `UserDirectory` backed by a Supabase users table.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::{Email, UserId};
use crate::ports::{StoreError, User, UserDirectory};

use super::client::SupabaseClient;

#[derive(Debug, Deserialize)]
struct UserRow {
    id: String,
    email: String,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id).map_err(|e| StoreError::Decode(e.to_string()))?,
            email: Email::new(row.email).map_err(|e| StoreError::Decode(e.to_string()))?,
        })
    }
}

/// Looks users up with an `eq` filter on the email column.
pub struct SupabaseUserDirectory {
    client: SupabaseClient,
}

impl SupabaseUserDirectory {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserDirectory for SupabaseUserDirectory {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StoreError> {
        let request = self
            .client
            .table(reqwest::Method::GET, self.client.users_table())
            .query(&[
                ("select", "id,email".to_string()),
                ("email", format!("eq.{}", email.as_str())),
                ("limit", "1".to_string()),
            ]);

        let rows: Vec<UserRow> = self.client.fetch_rows(request, "find_user_by_email").await?;

        rows.into_iter().next().map(User::try_from).transpose()
    }
}
