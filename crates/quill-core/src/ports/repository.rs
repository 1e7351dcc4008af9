use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, Subscriber, Tag};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique-constraint violations surface as
    /// [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Replace an existing entity. Fails with [`RepoError::NotFound`] when the
    /// ID is unknown.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] when
    /// nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts in store order.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// The `limit` most recent posts, newest `date` first.
    async fn find_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Every post whose ID is not in `excluded`, newest `date` first.
    async fn find_excluding(&self, excluded: &[Uuid]) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments referencing the given post, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Tag repository - used to resolve post tag references.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, RepoError>;

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Tag>, RepoError>;
}

/// Subscriber repository. Emails are unique.
#[async_trait]
pub trait SubscriberRepository: BaseRepository<Subscriber, Uuid> {
    /// Find a subscriber by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>, RepoError>;

    async fn find_all(&self) -> Result<Vec<Subscriber>, RepoError>;
}
