//! # Quill Core
//!
//! The domain layer of the Quill blog backend.
//! This crate contains the blog-post lifecycle, tag resolution and notification
//! fan-out, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{BlogService, Notifiers, SubscriberService};
