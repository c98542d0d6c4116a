//! 通知实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub recipient_id: i64,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub target_kind: Option<String>,
    pub target_id: Option<i64>,
    pub is_read: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RecipientId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Recipient,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notification(self) -> crate::models::notifications::entities::Notification {
        use crate::models::common::TargetRef;
        use crate::models::notifications::entities::{Notification, NotificationType};

        Notification {
            id: self.id,
            recipient_id: self.recipient_id,
            notification_type: self
                .notification_type
                .parse::<NotificationType>()
                .unwrap_or(NotificationType::General),
            title: self.title,
            message: self.message,
            target: TargetRef::from_columns(self.target_kind.as_deref(), self.target_id),
            is_read: self.is_read,
            created_at: to_datetime(self.created_at),
        }
    }
}
