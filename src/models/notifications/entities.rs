use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::TargetRef;
use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "notification.ts")]
    pub enum NotificationType("通知类型") {
        Grade => "GRADE",
        Fee => "FEE",
        Assignment => "ASSIGNMENT",
        General => "GENERAL",
    }
}

// 站内通知
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub target: Option<TargetRef>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
