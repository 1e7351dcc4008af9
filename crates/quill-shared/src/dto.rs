//! Data Transfer Objects - JSON request bodies accepted by the API.

use serde::{Deserialize, Serialize};

/// Request to comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub author: String,
    pub content: String,
}

/// Request to subscribe to the newsletter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}
