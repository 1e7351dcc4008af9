//! Newsletter delivery over SMTP.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::{Mailbox, Message, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use quill_core::domain::{Channel, Post};
use quill_core::error::NotifyError;
use quill_core::ports::{Notifier, SubscriberRepository};

use super::post_link;

/// SMTP connection settings.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    /// Empty host means the newsletter channel is not configured.
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub starttls: bool,
}

/// Sends a post to every subscriber, one message each.
pub struct NewsletterMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    subscribers: Arc<dyn SubscriberRepository>,
    site_url: String,
}

impl NewsletterMailer {
    /// Build the mailer. Fails with [`NotifyError::NotConfigured`] when no SMTP
    /// host is set.
    pub fn new(
        settings: &SmtpSettings,
        subscribers: Arc<dyn SubscriberRepository>,
        site_url: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let from = settings
            .from
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::Address(format!("{}: {}", settings.from, e)))?;

        if settings.host.trim().is_empty() {
            return Err(NotifyError::NotConfigured(Channel::Newsletter.as_str()));
        }

        let builder = if settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        }
        .map_err(|e| NotifyError::Transport(e.to_string()))?
        .port(settings.port);

        let builder = match (&settings.username, &settings.password) {
            (Some(username), Some(password)) => {
                builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => builder,
        };
        let transport = builder.build();

        Ok(Self {
            transport,
            from,
            subscribers,
            site_url: site_url.into(),
        })
    }

    fn compose(&self, post: &Post, recipient: &str) -> Result<Message, NotifyError> {
        let to = recipient
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::Address(format!("{}: {}", recipient, e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(post.title.clone())
            .header(header::ContentType::TEXT_PLAIN)
            .body(newsletter_body(post, &post_link(&self.site_url, post)))
            .map_err(|e| NotifyError::Transport(e.to_string()))
    }
}

/// Plain-text newsletter body.
pub(crate) fn newsletter_body(post: &Post, link: &str) -> String {
    let byline = if post.author.is_empty() {
        String::new()
    } else {
        format!("by {}\n\n", post.author)
    };

    format!(
        "{}\n{}{}\n\nRead the full post: {}\n\nYou are receiving this email because you subscribed to the newsletter.",
        post.title, byline, post.description, link
    )
}

#[async_trait]
impl Notifier for NewsletterMailer {
    fn channel(&self) -> Channel {
        Channel::Newsletter
    }

    async fn notify(&self, post: &Post) -> Result<(), NotifyError> {
        let subscribers = self.subscribers.find_all().await?;
        tracing::info!(
            post_id = %post.id,
            recipients = subscribers.len(),
            "Sending newsletter"
        );

        for subscriber in &subscribers {
            let message = self.compose(post, &subscriber.email)?;
            self.transport
                .send(message)
                .await
                .map_err(|e| NotifyError::Transport(e.to_string()))?;
        }

        Ok(())
    }
}
