use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Newsletter subscriber. The email is always stored normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub subscription_date: DateTime<Utc>,
}

impl Subscriber {
    /// Create a subscriber from a raw address, normalizing it first.
    pub fn new(email: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            email: normalize_email(email)?,
            subscription_date: Utc::now(),
        })
    }
}

/// Trim and lowercase an address; rejects empty and `@`-less input.
pub fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();

    if email.is_empty() {
        return Err(DomainError::Validation("Email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(DomainError::Validation(format!(
            "Invalid email address: {}",
            email
        )));
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_case_and_whitespace() {
        assert_eq!(normalize_email("A@x.com").unwrap(), "a@x.com");
        assert_eq!(normalize_email("a@x.com ").unwrap(), "a@x.com");
        assert_eq!(normalize_email("  Reader@Example.ORG\n").unwrap(), "reader@example.org");
    }

    #[test]
    fn test_normalize_email_rejects_invalid() {
        assert!(normalize_email("   ").is_err());
        assert!(normalize_email("not-an-address").is_err());
    }

    #[test]
    fn test_new_subscriber_is_normalized() {
        let subscriber = Subscriber::new(" Someone@Mail.com").unwrap();
        assert_eq!(subscriber.email, "someone@mail.com");
    }
}
