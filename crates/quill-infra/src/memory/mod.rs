//! In-memory document store - used when no database is configured and in tests.
//!
//! Note: Data is lost on process restart.

mod repository;

pub use repository::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryRepository,
    InMemorySubscriberRepository, InMemoryTagRepository, Record,
};
