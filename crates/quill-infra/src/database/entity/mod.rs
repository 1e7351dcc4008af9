//! SeaORM entities. Table layout is created by the `migration` app.

pub mod comment;
pub mod post;
pub mod subscriber;
pub mod tag;
