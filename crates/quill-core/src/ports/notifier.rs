//! Notification port - one-shot outbound calls fanned out from a post.

use async_trait::async_trait;

use crate::domain::{Channel, Post};
use crate::error::NotifyError;

/// An external service a post can be pushed to (newsletter, social network).
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel this notifier serves.
    fn channel(&self) -> Channel;

    /// Deliver the post. Nothing is recorded on success or failure.
    async fn notify(&self, post: &Post) -> Result<(), NotifyError>;
}
