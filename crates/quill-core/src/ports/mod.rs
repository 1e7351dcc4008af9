//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod notifier;
mod repository;
mod storage;

pub use notifier::Notifier;
pub use repository::{
    BaseRepository, CommentRepository, PostRepository, SubscriberRepository, TagRepository,
};
pub use storage::ImageStore;
