//! Application services - orchestration over the ports.

mod blog;
mod subscribers;

pub use blog::{BlogService, Notifiers, RECENT_LIMIT};
pub use subscribers::SubscriberService;
