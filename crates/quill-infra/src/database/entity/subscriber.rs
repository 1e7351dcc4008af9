//! Subscriber entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscribers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Normalized (trimmed, lowercase) address.
    #[sea_orm(unique)]
    pub email: String,
    pub subscription_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for quill_core::domain::Subscriber {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            subscription_date: model.subscription_date.into(),
        }
    }
}

impl From<quill_core::domain::Subscriber> for ActiveModel {
    fn from(subscriber: quill_core::domain::Subscriber) -> Self {
        Self {
            id: Set(subscriber.id),
            email: Set(subscriber.email),
            subscription_date: Set(subscriber.subscription_date.into()),
        }
    }
}
