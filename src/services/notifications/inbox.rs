use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::NotificationService;
use crate::models::notifications::requests::NotificationListQuery;
use crate::models::notifications::responses::{MarkAllReadResponse, UnreadCountResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, not_found, storage_error};

pub async fn list_notifications(
    service: &NotificationService,
    query: NotificationListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.list_notifications_with_pagination(user.id, query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Notification list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list notifications", e)),
    }
}

pub async fn unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.count_unread_notifications(user.id).await {
        Ok(unread_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse { unread_count },
            "Unread count retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to count unread notifications", e)),
    }
}

pub async fn mark_read(
    service: &NotificationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.mark_notification_read(user.id, id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification marked as read"))),
        Ok(false) => Ok(not_found(ErrorCode::NotFound, "Notification not found")),
        Err(e) => Ok(storage_error("Failed to mark notification as read", e)),
    }
}

pub async fn mark_all_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.mark_all_notifications_read(user.id).await {
        Ok(marked_count) => {
            debug!("Marked {} notifications read for account {}", marked_count, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MarkAllReadResponse { marked_count },
                "All notifications marked as read",
            )))
        }
        Err(e) => Ok(storage_error("Failed to mark notifications as read", e)),
    }
}

// 只能删除自己的通知
pub async fn delete_notification(
    service: &NotificationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_notification(user.id, id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Notification deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::NotFound, "Notification not found")),
        Err(e) => Ok(storage_error("Failed to delete notification", e)),
    }
}
