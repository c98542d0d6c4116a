use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::audit::entities::AuditAction;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{bad_request, current_user, not_found, storage_error};

const MAX_TITLE_LEN: usize = 200;

fn check_content(title: &str, message: &str) -> Result<(), HttpResponse> {
    let len = title.trim().chars().count();
    if len == 0 || len > MAX_TITLE_LEN {
        return Err(bad_request(
            ErrorCode::ValidationFailed,
            format!("Title must be 1-{MAX_TITLE_LEN} characters"),
        ));
    }
    if message.trim().is_empty() {
        return Err(bad_request(ErrorCode::ValidationFailed, "Message cannot be empty"));
    }
    Ok(())
}

pub async fn create_notification(
    service: &NotificationService,
    body: CreateNotificationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_content(&body.title, &body.message) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.get_user_by_id(body.recipient_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Recipient not found")),
        Err(e) => return Ok(storage_error("Failed to get recipient", e)),
    }

    // 带类型引用必须指向已存在的记录
    if let Some(target) = body.target {
        match storage.target_exists(target).await {
            Ok(true) => {}
            Ok(false) => {
                return Ok(bad_request(
                    ErrorCode::ValidationFailed,
                    format!("Referenced {} #{} does not exist", target.kind, target.id),
                ));
            }
            Err(e) => return Ok(storage_error("Failed to validate notification target", e)),
        }
    }

    match storage.create_notification(body).await {
        Ok(notification) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::Notification, notification.id),
                    notification.title.clone(),
                ),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                notification,
                "Notification created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Notification creation failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_content_is_required() {
        assert!(check_content("Fees due", "Term 2 fees are due on Friday").is_ok());
        assert!(check_content(" ", "body").is_err());
        assert!(check_content("Title", "  ").is_err());
        assert!(check_content(&"t".repeat(201), "body").is_err());
    }
}
