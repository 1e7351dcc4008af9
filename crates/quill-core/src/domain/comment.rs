use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - belongs to exactly one post through `post`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    /// Back-reference to the commented post.
    pub post: Uuid,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post: Uuid, author: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post,
            author,
            content,
            created_at: Utc::now(),
        }
    }
}
