//! 管理操作日志实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_action_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub action_time: i64,
    pub target_kind: Option<String>,
    pub target_id: Option<i64>,
    pub object_repr: String,
    pub action_flag: i16,
    pub change_message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_admin_log(self) -> crate::models::audit::entities::AdminActionLog {
        use crate::models::audit::entities::{ActionFlag, AdminActionLog};
        use crate::models::common::TargetRef;

        AdminActionLog {
            id: self.id,
            user_id: self.user_id,
            action_time: to_datetime(self.action_time),
            target: TargetRef::from_columns(self.target_kind.as_deref(), self.target_id),
            object_repr: self.object_repr,
            action_flag: ActionFlag::from_i16(self.action_flag).unwrap_or(ActionFlag::Change),
            change_message: self.change_message,
        }
    }
}
