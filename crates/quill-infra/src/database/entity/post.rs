//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub date: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image: String,
    /// Ordered tag references, stored as a JSON array of strings.
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

// Comments reference posts by id only; there is no foreign key.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for quill_core::domain::Post {
    fn from(model: Model) -> Self {
        let tags = serde_json::from_value(model.tags).unwrap_or_else(|e| {
            tracing::warn!(post_id = %model.id, error = %e, "Malformed tags column");
            Vec::new()
        });

        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            date: model.date.into(),
            description: model.description,
            image: model.image,
            tags,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<quill_core::domain::Post> for ActiveModel {
    fn from(post: quill_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            author: Set(post.author),
            date: Set(post.date.into()),
            description: Set(post.description),
            image: Set(post.image),
            tags: Set(serde_json::json!(post.tags)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
