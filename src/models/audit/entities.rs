use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::TargetRef;
use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "audit.ts")]
    pub enum AuditAction("审计动作") {
        Create => "CREATE",
        Update => "UPDATE",
        Delete => "DELETE",
        Login => "LOGIN",
        Logout => "LOGOUT",
        Access => "ACCESS",
        Other => "OTHER",
    }
}

/// 管理操作类型，存储为非负整数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "audit.ts")]
pub enum ActionFlag {
    Addition,
    Change,
    Deletion,
}

impl ActionFlag {
    pub fn as_i16(&self) -> i16 {
        match self {
            ActionFlag::Addition => 1,
            ActionFlag::Change => 2,
            ActionFlag::Deletion => 3,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            1 => Some(ActionFlag::Addition),
            2 => Some(ActionFlag::Change),
            3 => Some(ActionFlag::Deletion),
            _ => None,
        }
    }
}

impl From<AuditAction> for Option<ActionFlag> {
    fn from(action: AuditAction) -> Self {
        match action {
            AuditAction::Create => Some(ActionFlag::Addition),
            AuditAction::Update => Some(ActionFlag::Change),
            AuditAction::Delete => Some(ActionFlag::Deletion),
            _ => None,
        }
    }
}

// 审计日志
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "audit.ts")]
pub struct AuditLog {
    pub id: i64,
    pub user_id: Option<i64>,
    pub action: AuditAction,
    pub target: Option<TargetRef>,
    #[ts(type = "any")]
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

// 管理操作日志
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "audit.ts")]
pub struct AdminActionLog {
    pub id: i64,
    pub user_id: i64,
    pub action_time: DateTime<Utc>,
    pub target: Option<TargetRef>,
    pub object_repr: String,
    pub action_flag: ActionFlag,
    pub change_message: String,
}

/// 待写入的活动记录
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub user_id: Option<i64>,
    pub action: AuditAction,
    pub target: Option<TargetRef>,
    pub details: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAdminActionLog {
    pub user_id: i64,
    pub target: Option<TargetRef>,
    pub object_repr: String,
    pub action_flag: ActionFlag,
    pub change_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_flag_values() {
        for flag in [ActionFlag::Addition, ActionFlag::Change, ActionFlag::Deletion] {
            assert_eq!(ActionFlag::from_i16(flag.as_i16()), Some(flag));
        }
        assert_eq!(ActionFlag::from_i16(0), None);
        let flag: Option<ActionFlag> = AuditAction::Login.into();
        assert_eq!(flag, None);
        let flag: Option<ActionFlag> = AuditAction::Delete.into();
        assert_eq!(flag, Some(ActionFlag::Deletion));
    }
}
