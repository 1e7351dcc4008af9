//! Notification services - newsletter email and social cross-posting.
//!
//! Every notifier performs a single outbound call per post (per subscriber for
//! the newsletter) and keeps no state between calls.

mod email;
mod facebook;
mod linkedin;
mod twitter;

use async_trait::async_trait;

use quill_core::domain::{Channel, Post};
use quill_core::error::NotifyError;
use quill_core::ports::Notifier;

pub use email::{NewsletterMailer, SmtpSettings};
pub use facebook::{FacebookPoster, FacebookSettings};
pub use linkedin::{LinkedInPoster, LinkedInSettings};
pub use twitter::{TwitterPoster, TwitterSettings};

/// Stand-in for a channel whose credentials are missing; every call fails.
pub struct UnconfiguredNotifier {
    channel: Channel,
}

impl UnconfiguredNotifier {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl Notifier for UnconfiguredNotifier {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn notify(&self, post: &Post) -> Result<(), NotifyError> {
        tracing::warn!(
            post_id = %post.id,
            channel = %self.channel,
            "Notification requested for a channel without credentials"
        );
        Err(NotifyError::NotConfigured(self.channel.as_str()))
    }
}

/// Public URL of a post on the blog front-end.
pub(crate) fn post_link(site_url: &str, post: &Post) -> String {
    format!("{}/blog/{}", site_url.trim_end_matches('/'), post.id)
}

/// Turn a non-2xx response into [`NotifyError::Rejected`].
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<(), NotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(NotifyError::Rejected {
        status: status.as_u16(),
        body,
    })
}

pub(crate) fn transport_error(err: reqwest::Error) -> NotifyError {
    NotifyError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::NewPost;

    #[test]
    fn test_post_link_trims_trailing_slash() {
        let post = Post::new(NewPost::default());
        assert_eq!(
            post_link("https://blog.example.com/", &post),
            format!("https://blog.example.com/blog/{}", post.id)
        );
    }

    #[tokio::test]
    async fn test_unconfigured_notifier_fails() {
        let notifier = UnconfiguredNotifier::new(Channel::Facebook);
        let result = notifier.notify(&Post::new(NewPost::default())).await;

        assert!(matches!(result, Err(NotifyError::NotConfigured("facebook"))));
    }
}
