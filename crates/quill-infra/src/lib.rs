//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the document store, image storage, and the outbound
//! newsletter and social integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only
//! - `postgres` - PostgreSQL document store via SeaORM

pub mod database;
pub mod memory;
pub mod notify;
pub mod storage;

// Re-exports - In-Memory
pub use memory::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemorySubscriberRepository,
    InMemoryTagRepository,
};

pub use database::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;

pub use notify::{
    FacebookPoster, FacebookSettings, LinkedInPoster, LinkedInSettings, NewsletterMailer,
    SmtpSettings, TwitterPoster, TwitterSettings, UnconfiguredNotifier,
};
pub use storage::LocalImageStore;
