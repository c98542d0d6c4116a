//! 活动记录
//!
//! 每次成功的写操作、登录与注销之后写入一条审计日志；
//! 操作者拥有管理员权限且动作为增删改时，再写入一条管理操作日志。
//! 写日志失败只记录警告，不影响业务响应。

use actix_web::HttpRequest;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::middlewares::rate_limit::client_ip;
use crate::models::TargetRef;
use crate::models::audit::entities::{ActionFlag, AuditAction, NewAdminActionLog, NewAuditLog};
use crate::models::users::entities::User;
use crate::policy;
use crate::storage::Storage;

pub struct Activity {
    pub action: AuditAction,
    pub target: Option<TargetRef>,
    pub object_repr: String,
    pub details: Option<Value>,
}

impl Activity {
    pub fn new(action: AuditAction, target: TargetRef, object_repr: impl Into<String>) -> Self {
        Self {
            action,
            target: Some(target),
            object_repr: object_repr.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

fn change_message(activity: &Activity) -> String {
    match &activity.details {
        Some(details) => format!("{} {}: {}", activity.action, activity.object_repr, details),
        None => format!("{} {}", activity.action, activity.object_repr),
    }
}

pub async fn record(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    actor: &User,
    activity: Activity,
) {
    let ip_address = client_ip(&request.connection_info(), request.headers());

    let audit = NewAuditLog {
        user_id: Some(actor.id),
        action: activity.action,
        target: activity.target,
        details: activity.details.clone(),
        ip_address,
    };
    if let Err(e) = storage.create_audit_log(audit).await {
        warn!("Failed to write audit log for account {}: {}", actor.id, e);
    }

    let flag: Option<ActionFlag> = activity.action.into();
    if let Some(action_flag) = flag
        && policy::has_admin_authority(actor)
    {
        let entry = NewAdminActionLog {
            user_id: actor.id,
            target: activity.target,
            object_repr: activity.object_repr.clone(),
            action_flag,
            change_message: change_message(&activity),
        };
        if let Err(e) = storage.create_admin_action_log(entry).await {
            warn!("Failed to write admin action log for account {}: {}", actor.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TargetKind;
    use serde_json::json;

    #[test]
    fn test_change_message_includes_details() {
        let activity = Activity::new(
            AuditAction::Update,
            TargetRef::new(TargetKind::Fee, 3),
            "Fee #3",
        )
        .with_details(json!({"amount_paid": "150.00"}));
        let msg = change_message(&activity);
        assert!(msg.starts_with("UPDATE Fee #3"));
        assert!(msg.contains("150.00"));

        let plain = Activity::new(AuditAction::Delete, TargetRef::new(TargetKind::Grade, 1), "Grade #1");
        assert_eq!(change_message(&plain), "DELETE Grade #1");
    }
}
