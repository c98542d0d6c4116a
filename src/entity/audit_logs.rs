//! 审计日志实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Option<i64>,
    pub action: String,
    pub target_kind: Option<String>,
    pub target_id: Option<i64>,
    /// JSON 文本
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_audit_log(self) -> crate::models::audit::entities::AuditLog {
        use crate::models::audit::entities::{AuditAction, AuditLog};
        use crate::models::common::TargetRef;

        AuditLog {
            id: self.id,
            user_id: self.user_id,
            action: self
                .action
                .parse::<AuditAction>()
                .unwrap_or(AuditAction::Other),
            target: TargetRef::from_columns(self.target_kind.as_deref(), self.target_id),
            details: self
                .details
                .and_then(|d| serde_json::from_str(&d).ok()),
            ip_address: self.ip_address,
            created_at: to_datetime(self.created_at),
        }
    }
}
