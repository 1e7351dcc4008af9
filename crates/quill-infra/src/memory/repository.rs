use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, Subscriber, Tag};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CommentRepository, PostRepository, SubscriberRepository, TagRepository,
};

/// A record that can live in an [`InMemoryRepository`].
pub trait Record: Clone + Send + Sync + 'static {
    /// Primary key.
    fn id(&self) -> Uuid;

    /// Value of the unique index, if the record type has one.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Record for Post {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Comment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Tag {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Record for Subscriber {
    fn id(&self) -> Uuid {
        self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }
}

/// Insertion-ordered table guarded by an async RwLock.
pub struct InMemoryRepository<T> {
    rows: RwLock<Vec<T>>,
}

pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;
pub type InMemoryTagRepository = InMemoryRepository<Tag>;
pub type InMemorySubscriberRepository = InMemoryRepository<Subscriber>;

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    async fn select<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        let rows = self.rows.read().await;
        rows.iter().filter(|row| predicate(row)).cloned().collect()
    }

    fn check_unique(rows: &[T], entity: &T) -> Result<(), RepoError> {
        let Some(key) = entity.unique_key() else {
            return Ok(());
        };

        let taken = rows
            .iter()
            .any(|row| row.id() != entity.id() && row.unique_key() == Some(key));
        if taken {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint: {}",
                key
            )));
        }

        Ok(())
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|row| row.id() == entity.id()) {
            return Err(RepoError::Constraint(format!(
                "duplicate primary key: {}",
                entity.id()
            )));
        }
        Self::check_unique(&rows, &entity)?;

        rows.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        Self::check_unique(&rows, &entity)?;

        let slot = rows
            .iter_mut()
            .find(|row| row.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();

        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);

        if rows.len() == before {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// Sort newest `date` first. Stable, so equal dates keep insertion order.
fn newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

#[async_trait]
impl PostRepository for InMemoryRepository<Post> {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.select(|_| true).await)
    }

    async fn find_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.select(|_| true).await;
        newest_first(&mut posts);
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }

    async fn find_excluding(&self, excluded: &[Uuid]) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.select(|post| !excluded.contains(&post.id)).await;
        newest_first(&mut posts);
        Ok(posts)
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository<Comment> {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self.select(|comment| comment.post == post_id).await)
    }
}

#[async_trait]
impl TagRepository for InMemoryRepository<Tag> {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, RepoError> {
        Ok(self.select(|tag| ids.contains(&tag.id)).await)
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Tag>, RepoError> {
        Ok(self.select(|tag| names.contains(&tag.name)).await)
    }
}

#[async_trait]
impl SubscriberRepository for InMemoryRepository<Subscriber> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Subscriber>, RepoError> {
        Ok(self.select(|_| true).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use quill_core::domain::{Channel, NewPost, PostChanges, TagRef};
    use quill_core::ports::Notifier;
    use quill_core::{BlogService, DomainError, Notifiers, SubscriberService};

    use super::*;

    fn blog(tags: Arc<InMemoryTagRepository>) -> (BlogService, Arc<InMemoryPostRepository>) {
        let posts = Arc::new(InMemoryPostRepository::new());
        let service = BlogService::new(
            posts.clone(),
            Arc::new(InMemoryCommentRepository::new()),
            tags,
            Notifiers::default(),
        );
        (service, posts)
    }

    async fn seed(service: &BlogService, count: i64) -> Vec<Post> {
        let mut created = Vec::new();
        for i in 0..count {
            let post = service
                .create(NewPost {
                    title: format!("Post {}", i),
                    date: Some(Utc::now() - Duration::days(count - i)),
                    ..Default::default()
                })
                .await
                .unwrap();
            created.push(post);
        }
        created
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryPostRepository::new();
        let post = Post::new(NewPost::default());
        repo.insert(post.clone()).await.unwrap();

        assert_eq!(repo.find_by_id(post.id).await.unwrap(), Some(post));
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(Post::new(NewPost::default())).await.unwrap();

        repo.delete(post.id).await.unwrap();
        assert!(matches!(repo.delete(post.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_unique_key_is_enforced() {
        let repo = InMemorySubscriberRepository::new();
        repo.insert(Subscriber::new("a@x.com").unwrap()).await.unwrap();

        let result = repo.insert(Subscriber::new("A@x.com ").unwrap()).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let (service, _) = blog(Arc::new(InMemoryTagRepository::new()));
        let created = seed(&service, 5).await;

        let recent = service.recent().await.unwrap();
        let ids: Vec<_> = recent.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![created[4].id, created[3].id, created[2].id]);
    }

    #[tokio::test]
    async fn test_others_excludes_recent_set() {
        let (service, _) = blog(Arc::new(InMemoryTagRepository::new()));
        let created = seed(&service, 5).await;

        let others = service.others().await.unwrap();
        let ids: Vec<_> = others.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![created[1].id, created[0].id]);
    }

    #[tokio::test]
    async fn test_others_is_empty_with_three_posts() {
        let (service, _) = blog(Arc::new(InMemoryTagRepository::new()));
        seed(&service, 3).await;

        assert!(matches!(
            service.others().await,
            Err(DomainError::NoResults(_))
        ));
    }

    #[tokio::test]
    async fn test_recent_without_posts_is_no_results() {
        let (service, _) = blog(Arc::new(InMemoryTagRepository::new()));
        assert!(matches!(
            service.recent().await,
            Err(DomainError::NoResults(_))
        ));
    }

    #[tokio::test]
    async fn test_tags_resolve_by_id_and_name() {
        let tags = Arc::new(InMemoryTagRepository::new());
        let rust = tags.insert(Tag::new("rust")).await.unwrap();
        let web = tags.insert(Tag::new("web")).await.unwrap();
        let (service, _) = blog(tags);

        let post = service
            .create(NewPost {
                tags: vec![rust.id.to_string(), "web".into(), "unknown".into()],
                ..Default::default()
            })
            .await
            .unwrap();

        let view = service.get(post.id).await.unwrap();
        assert_eq!(
            view.tags,
            vec![
                TagRef::Resolved(rust),
                TagRef::Resolved(web),
                TagRef::Unresolved("unknown".into()),
            ]
        );
        assert_eq!(view.comments, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let (service, _) = blog(Arc::new(InMemoryTagRepository::new()));
        let result = service.update(Uuid::new_v4(), PostChanges::default()).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_fan_out_without_notifier_fails() {
        let (service, _) = blog(Arc::new(InMemoryTagRepository::new()));
        let post = service.create(NewPost::default()).await.unwrap();

        let result = service.fan_out(post.id, Channel::Twitter).await;
        assert!(matches!(
            result,
            Err(DomainError::Notification {
                channel: Channel::Twitter,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_fan_out_unknown_post_skips_notifier() {
        struct Panicking;

        #[async_trait]
        impl Notifier for Panicking {
            fn channel(&self) -> Channel {
                Channel::Newsletter
            }

            async fn notify(&self, _post: &Post) -> Result<(), quill_core::error::NotifyError> {
                panic!("notifier must not be called for an unknown post");
            }
        }

        let service = BlogService::new(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryCommentRepository::new()),
            Arc::new(InMemoryTagRepository::new()),
            Notifiers::new([Arc::new(Panicking) as Arc<dyn Notifier>]),
        );

        let result = service.fan_out(Uuid::new_v4(), Channel::Newsletter).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_subscribe_rejects_normalized_duplicate() {
        let service = SubscriberService::new(Arc::new(InMemorySubscriberRepository::new()));

        service.subscribe("A@x.com").await.unwrap();
        let result = service.subscribe("a@x.com ").await;

        assert!(matches!(result, Err(DomainError::Duplicate(_))));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }
}
