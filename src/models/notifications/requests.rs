use serde::Deserialize;
use ts_rs::TS;

use super::entities::NotificationType;
use crate::models::common::pagination::deserialize_optional_bool;
use crate::models::common::{PaginationQuery, TargetRef};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct CreateNotificationRequest {
    pub recipient_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub target: Option<TargetRef>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct NotificationListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub unread_only: Option<bool>,
    pub notification_type: Option<NotificationType>,
}
