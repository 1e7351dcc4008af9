use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, Tag};
use crate::error::DomainError;

/// Post entity - a blog post as stored.
///
/// `tags` keeps the raw references exactly as the client sent them; they are
/// resolved into [`Tag`] records only when building a [`PostView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub description: String,
    /// Reference path of the uploaded image (`/<file>`), or empty.
    pub image: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
}

/// Changes applied by an update.
///
/// `None` leaves the stored value untouched. Tags are always replaced.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<String>,
}

impl Post {
    /// Create a new post with generated ID and timestamps.
    pub fn new(input: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            author: input.author,
            date: input.date.unwrap_or(now),
            description: input.description,
            image: input.image.unwrap_or_default(),
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update in place.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(author) = changes.author {
            self.author = author;
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        self.tags = changes.tags;
        self.updated_at = Utc::now();
    }
}

/// Split a comma-separated tag field into trimmed entries.
///
/// A missing or blank field yields no tags. Otherwise every piece is kept,
/// including empty ones between or after commas.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(value) if !value.trim().is_empty() => {
            value.split(',').map(|tag| tag.trim().to_string()).collect()
        }
        _ => Vec::new(),
    }
}

/// Parse a client-supplied post date.
///
/// Accepts RFC 3339, `datetime-local` values (`2024-05-01T10:30`), plain dates
/// (`2024-05-01`, taken as midnight UTC) and epoch milliseconds.
pub fn parse_post_date(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let value = raw.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    if let Ok(millis) = value.parse::<i64>() {
        if let Some(date) = DateTime::from_timestamp_millis(millis) {
            return Ok(date);
        }
    }

    Err(DomainError::Validation(format!(
        "Invalid date \"{}\" for field date",
        value
    )))
}

/// A tag reference as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagRef {
    Resolved(Tag),
    /// Reference that matched no stored tag; kept verbatim.
    Unresolved(String),
}

/// Response view of a post with its tags resolved and, for the single-post
/// view, its comments attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub image: String,
    pub tags: Vec<TagRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
}

impl PostView {
    pub fn new(post: Post, tags: Vec<TagRef>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            date: post.date,
            description: post.description,
            image: post.image,
            tags,
            created_at: post.created_at,
            updated_at: post.updated_at,
            comments: None,
        }
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = Some(comments);
        self
    }
}
