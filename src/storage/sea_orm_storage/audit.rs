//! 审计日志与管理操作日志，只追加

use super::{SeaOrmStorage, paginate};
use crate::entity::{admin_action_logs, audit_logs};
use crate::errors::{Result, SchoolError};
use crate::models::{
    TargetRef,
    audit::{
        entities::{AdminActionLog, AuditLog, NewAdminActionLog, NewAuditLog},
        requests::{AdminLogListQuery, AuditLogListQuery},
        responses::{AdminLogListResponse, AuditLogListResponse},
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_audit_log_impl(&self, log: NewAuditLog) -> Result<AuditLog> {
        let details = log
            .details
            .map(|value| serde_json::to_string(&value))
            .transpose()?;
        let (target_kind, target_id) = TargetRef::into_columns(log.target);

        let model = audit_logs::ActiveModel {
            user_id: Set(log.user_id),
            action: Set(log.action.to_string()),
            target_kind: Set(target_kind),
            target_id: Set(target_id),
            details: Set(details),
            ip_address: Set(log.ip_address),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("写入审计日志失败", e))?;
        Ok(result.into_audit_log())
    }

    pub async fn list_audit_logs_with_pagination_impl(
        &self,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = audit_logs::Entity::find();

        if let Some(user_id) = query.user_id {
            select = select.filter(audit_logs::Column::UserId.eq(user_id));
        }
        if let Some(action) = query.action {
            select = select.filter(audit_logs::Column::Action.eq(action.as_str()));
        }
        if let Some(kind) = query.target_kind {
            select = select.filter(audit_logs::Column::TargetKind.eq(kind.as_str()));
        }
        if let Some(target_id) = query.target_id {
            select = select.filter(audit_logs::Column::TargetId.eq(target_id));
        }

        let select = select
            .order_by_desc(audit_logs::Column::CreatedAt)
            .order_by_desc(audit_logs::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "审计日志").await?;
        Ok(AuditLogListResponse {
            items: rows.into_iter().map(|m| m.into_audit_log()).collect(),
            pagination,
        })
    }

    pub async fn create_admin_action_log_impl(
        &self,
        log: NewAdminActionLog,
    ) -> Result<AdminActionLog> {
        let (target_kind, target_id) = TargetRef::into_columns(log.target);

        let model = admin_action_logs::ActiveModel {
            user_id: Set(log.user_id),
            action_time: Set(chrono::Utc::now().timestamp()),
            target_kind: Set(target_kind),
            target_id: Set(target_id),
            object_repr: Set(log.object_repr),
            action_flag: Set(log.action_flag.as_i16()),
            change_message: Set(log.change_message),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("写入管理日志失败", e))?;
        Ok(result.into_admin_log())
    }

    pub async fn list_admin_action_logs_with_pagination_impl(
        &self,
        query: AdminLogListQuery,
    ) -> Result<AdminLogListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = admin_action_logs::Entity::find();

        if let Some(user_id) = query.user_id {
            select = select.filter(admin_action_logs::Column::UserId.eq(user_id));
        }
        if let Some(kind) = query.target_kind {
            select = select.filter(admin_action_logs::Column::TargetKind.eq(kind.as_str()));
        }

        let select = select
            .order_by_desc(admin_action_logs::Column::ActionTime)
            .order_by_desc(admin_action_logs::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "管理日志").await?;
        Ok(AdminLogListResponse {
            items: rows.into_iter().map(|m| m.into_admin_log()).collect(),
            pagination,
        })
    }
}
