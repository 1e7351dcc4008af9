//! Domain entities - the core business objects.

mod channel;
mod comment;
mod post;
mod subscriber;
mod tag;

pub use channel::Channel;
pub use comment::Comment;
pub use post::{NewPost, Post, PostChanges, PostView, TagRef, parse_post_date, parse_tags};
pub use subscriber::{Subscriber, normalize_email};
pub use tag::Tag;
