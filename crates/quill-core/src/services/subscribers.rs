use std::sync::Arc;

use crate::domain::{Subscriber, normalize_email};
use crate::error::{DomainError, RepoError};
use crate::ports::SubscriberRepository;

/// Newsletter subscription management.
#[derive(Clone)]
pub struct SubscriberService {
    subscribers: Arc<dyn SubscriberRepository>,
}

impl SubscriberService {
    pub fn new(subscribers: Arc<dyn SubscriberRepository>) -> Self {
        Self { subscribers }
    }

    /// Register an address. Case and whitespace variants of an existing
    /// address are rejected as duplicates.
    pub async fn subscribe(&self, email: &str) -> Result<Subscriber, DomainError> {
        let subscriber = Subscriber::new(email)?;

        if self
            .subscribers
            .find_by_email(&subscriber.email)
            .await?
            .is_some()
        {
            return Err(DomainError::Duplicate(format!(
                "Email {} is already subscribed",
                subscriber.email
            )));
        }

        let subscriber = self.subscribers.insert(subscriber).await?;
        tracing::info!(subscriber_id = %subscriber.id, "Subscriber registered");
        Ok(subscriber)
    }

    pub async fn list(&self) -> Result<Vec<Subscriber>, DomainError> {
        Ok(self.subscribers.find_all().await?)
    }

    pub async fn unsubscribe(&self, email: &str) -> Result<(), DomainError> {
        let email = normalize_email(email)?;
        let subscriber = self
            .subscribers
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::not_found("Subscriber", &email))?;

        self.subscribers
            .delete(subscriber.id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::not_found("Subscriber", &email),
                other => other.into(),
            })
    }
}
