//! Blog post lifecycle: persistence, tag resolution, comments and fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Channel, Comment, NewPost, Post, PostChanges, PostView, Tag, TagRef};
use crate::error::{DomainError, NotifyError, RepoError};
use crate::ports::{CommentRepository, Notifier, PostRepository, TagRepository};

/// Number of posts considered "recent".
pub const RECENT_LIMIT: u64 = 3;

const POST: &str = "Blog post";
const COMMENT: &str = "Comment";

/// Notifiers keyed by the channel they serve.
#[derive(Clone, Default)]
pub struct Notifiers {
    by_channel: HashMap<Channel, Arc<dyn Notifier>>,
}

impl Notifiers {
    pub fn new(notifiers: impl IntoIterator<Item = Arc<dyn Notifier>>) -> Self {
        let by_channel = notifiers
            .into_iter()
            .map(|notifier| (notifier.channel(), notifier))
            .collect();
        Self { by_channel }
    }

    pub fn get(&self, channel: Channel) -> Option<&Arc<dyn Notifier>> {
        self.by_channel.get(&channel)
    }
}

/// Orchestrates every blog-post operation exposed over HTTP.
///
/// Each step runs strictly in sequence; mutating and fan-out operations always
/// re-read the post from the store first.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    tags: Arc<dyn TagRepository>,
    notifiers: Notifiers,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        tags: Arc<dyn TagRepository>,
        notifiers: Notifiers,
    ) -> Self {
        Self {
            posts,
            comments,
            tags,
            notifiers,
        }
    }

    /// Persist a new post. The returned post carries its raw tag references.
    pub async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let post = self.posts.insert(Post::new(input)).await?;
        tracing::info!(post_id = %post.id, title = %post.title, "Blog post created");
        Ok(post)
    }

    pub async fn list(&self) -> Result<Vec<PostView>, DomainError> {
        let posts = self.posts.find_all().await?;
        self.resolve_tags(posts).await
    }

    pub async fn recent(&self) -> Result<Vec<PostView>, DomainError> {
        let posts = self.posts.find_recent(RECENT_LIMIT).await?;
        if posts.is_empty() {
            return Err(DomainError::NoResults("No blog posts found"));
        }
        self.resolve_tags(posts).await
    }

    /// Every post outside the recent set, newest first.
    pub async fn others(&self) -> Result<Vec<PostView>, DomainError> {
        let recent_ids: Vec<Uuid> = self
            .posts
            .find_recent(RECENT_LIMIT)
            .await?
            .into_iter()
            .map(|post| post.id)
            .collect();

        let posts = self.posts.find_excluding(&recent_ids).await?;
        if posts.is_empty() {
            return Err(DomainError::NoResults("No additional blog posts found"));
        }
        self.resolve_tags(posts).await
    }

    /// A single post with tags resolved and its comments attached.
    pub async fn get(&self, id: Uuid) -> Result<PostView, DomainError> {
        let post = self.find(id).await?;
        let mut views = self.resolve_tags(vec![post]).await?;
        let view = views.pop().ok_or_else(|| DomainError::not_found(POST, id))?;

        let comments = self.comments.find_by_post(id).await?;
        Ok(view.with_comments(comments))
    }

    /// Fail with not-found unless a post with `id` is stored.
    pub async fn ensure_exists(&self, id: Uuid) -> Result<(), DomainError> {
        self.find(id).await.map(|_| ())
    }

    pub async fn update(&self, id: Uuid, changes: PostChanges) -> Result<PostView, DomainError> {
        let mut post = self.find(id).await?;
        post.apply(changes);

        let post = self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(POST, id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %post.id, "Blog post updated");

        let mut views = self.resolve_tags(vec![post]).await?;
        views.pop().ok_or_else(|| DomainError::not_found(POST, id))
    }

    /// Delete a post. Its comments are left in place.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(POST, id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Blog post deleted");
        Ok(())
    }

    pub async fn comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.find(post_id).await?;
        Ok(self.comments.find_by_post(post_id).await?)
    }

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        author: String,
        content: String,
    ) -> Result<Comment, DomainError> {
        self.find(post_id).await?;
        let comment = self
            .comments
            .insert(Comment::new(post_id, author, content))
            .await?;
        tracing::info!(post_id = %post_id, comment_id = %comment.id, "Comment added");
        Ok(comment)
    }

    pub async fn delete_comment(&self, id: Uuid) -> Result<(), DomainError> {
        self.comments.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(COMMENT, id),
            other => other.into(),
        })
    }

    /// Push a stored post to one notification channel.
    ///
    /// The post is re-read first; an unknown id fails before any external call.
    pub async fn fan_out(&self, id: Uuid, channel: Channel) -> Result<(), DomainError> {
        let post = self.find(id).await?;

        let notifier = self
            .notifiers
            .get(channel)
            .ok_or(DomainError::Notification {
                channel,
                source: NotifyError::NotConfigured(channel.as_str()),
            })?;

        notifier
            .notify(&post)
            .await
            .map_err(|source| DomainError::Notification { channel, source })?;

        tracing::info!(post_id = %id, channel = %channel, "Post fanned out");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(POST, id))
    }

    /// Replace raw tag references with stored tags.
    ///
    /// References that parse as a UUID are looked up by id, everything else by
    /// name; both lookups are batched across all posts. Unknown references are
    /// kept verbatim and order is preserved.
    pub async fn resolve_tags(&self, posts: Vec<Post>) -> Result<Vec<PostView>, DomainError> {
        let mut ids = Vec::new();
        let mut names = Vec::new();
        for reference in posts.iter().flat_map(|post| post.tags.iter()) {
            match Uuid::parse_str(reference) {
                Ok(id) if !ids.contains(&id) => ids.push(id),
                Ok(_) => {}
                Err(_) if !names.contains(reference) => names.push(reference.clone()),
                Err(_) => {}
            }
        }

        let by_id: HashMap<Uuid, Tag> = if ids.is_empty() {
            HashMap::new()
        } else {
            self.tags
                .find_by_ids(&ids)
                .await?
                .into_iter()
                .map(|tag| (tag.id, tag))
                .collect()
        };
        let by_name: HashMap<String, Tag> = if names.is_empty() {
            HashMap::new()
        } else {
            self.tags
                .find_by_names(&names)
                .await?
                .into_iter()
                .map(|tag| (tag.name.clone(), tag))
                .collect()
        };

        let views = posts
            .into_iter()
            .map(|post| {
                let tags = post
                    .tags
                    .iter()
                    .map(|reference| {
                        let resolved = match Uuid::parse_str(reference) {
                            Ok(id) => by_id.get(&id),
                            Err(_) => by_name.get(reference),
                        };
                        match resolved {
                            Some(tag) => TagRef::Resolved(tag.clone()),
                            None => TagRef::Unresolved(reference.clone()),
                        }
                    })
                    .collect();
                PostView::new(post, tags)
            })
            .collect();

        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Noop(Channel);

    #[async_trait]
    impl Notifier for Noop {
        fn channel(&self) -> Channel {
            self.0
        }

        async fn notify(&self, _post: &Post) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_notifiers_keyed_by_channel() {
        let notifiers = Notifiers::new([Arc::new(Noop(Channel::Twitter)) as Arc<dyn Notifier>]);

        let twitter = notifiers.get(Channel::Twitter).unwrap();
        assert_eq!(twitter.channel(), Channel::Twitter);
        assert!(twitter.notify(&Post::new(NewPost::default())).await.is_ok());
        assert!(notifiers.get(Channel::Facebook).is_none());
    }
}
