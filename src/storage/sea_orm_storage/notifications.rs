//! 通知存储操作

use super::system::target_exists_on;
use super::{SeaOrmStorage, paginate};
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{Result, SchoolError};
use crate::models::{
    TargetRef,
    notifications::{
        entities::Notification,
        requests::{CreateNotificationRequest, NotificationListQuery},
        responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建通知；带引用时先确认被引用记录存在
    pub async fn create_notification_impl(
        &self,
        req: CreateNotificationRequest,
    ) -> Result<Notification> {
        if let Some(target) = req.target
            && !target_exists_on(&self.db, target).await?
        {
            return Err(SchoolError::validation(format!(
                "Referenced {target} does not exist"
            )));
        }

        let (target_kind, target_id) = TargetRef::into_columns(req.target);
        let model = ActiveModel {
            recipient_id: Set(req.recipient_id),
            notification_type: Set(req.notification_type.to_string()),
            title: Set(req.title),
            message: Set(req.message),
            target_kind: Set(target_kind),
            target_id: Set(target_id),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建通知失败", e))?;

        Ok(result.into_notification())
    }

    /// 列出用户通知（分页）
    pub async fn list_notifications_with_pagination_impl(
        &self,
        recipient_id: i64,
        query: NotificationListQuery,
    ) -> Result<NotificationListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Notifications::find().filter(Column::RecipientId.eq(recipient_id));

        // 未读筛选
        if let Some(true) = query.unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }
        if let Some(kind) = query.notification_type {
            select = select.filter(Column::NotificationType.eq(kind.as_str()));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let (rows, pagination) = paginate(&self.db, select, page, size, "通知").await?;

        Ok(NotificationListResponse {
            items: rows.into_iter().map(|m| m.into_notification()).collect(),
            pagination,
        })
    }

    /// 获取用户未读通知数量
    pub async fn count_unread_notifications_impl(&self, recipient_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询未读通知数量失败", e))?;

        Ok(count as i64)
    }

    /// 标记通知为已读，只作用于本人的通知
    pub async fn mark_notification_read_impl(&self, recipient_id: i64, id: i64) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::RecipientId.eq(recipient_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("标记通知已读失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 标记用户所有通知为已读
    pub async fn mark_all_notifications_read_impl(&self, recipient_id: i64) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("标记全部通知已读失败", e))?;

        Ok(result.rows_affected as i64)
    }

    /// 删除本人的通知
    pub async fn delete_notification_impl(&self, recipient_id: i64, id: i64) -> Result<bool> {
        let result = Notifications::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::RecipientId.eq(recipient_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除通知失败", e))?;

        Ok(result.rows_affected > 0)
    }
}
