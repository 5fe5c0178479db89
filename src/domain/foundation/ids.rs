//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Identifier of a user in the persistence store.
///
/// Issued by the store (a UUID in Supabase), so it is kept as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer email address as received from a provider.
///
/// Stored verbatim: lookups are exact matches, so no case folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates an Email after trimming surrounding whitespace.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !trimmed.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_displays_inner_value() {
        let id = UserId::new("7d1f0c2e-user").unwrap();
        assert_eq!(id.to_string(), "7d1f0c2e-user");
        assert_eq!(id.as_str(), "7d1f0c2e-user");
    }

    #[test]
    fn email_trims_whitespace() {
        let email = Email::new("  a@b.com ").unwrap();
        assert_eq!(email.as_str(), "a@b.com");
    }

    #[test]
    fn email_preserves_case() {
        let email = Email::new("Seller@Example.com").unwrap();
        assert_eq!(email.as_str(), "Seller@Example.com");
    }

    #[test]
    fn email_rejects_empty() {
        assert_eq!(
            Email::new(""),
            Err(ValidationError::empty_field("email"))
        );
    }

    #[test]
    fn email_rejects_missing_at_symbol() {
        assert!(matches!(
            Email::new("not-an-email"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn email_serializes_transparently() {
        let email = Email::new("a@b.com").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"a@b.com\"");
    }
}
