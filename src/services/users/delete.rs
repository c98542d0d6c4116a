use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::AuditAction;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{bad_request, current_user, not_found, storage_error};

/// 硬删除账号
///
/// 不能删除自己或超级用户；仍被学生/教师档案引用时由外键拒绝（409）。
pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if user_id == actor.id {
        return Ok(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete the current account",
        ));
    }

    let storage = service.get_storage(request);

    let target = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "Account not found")),
        Err(e) => return Ok(storage_error("Failed to get account", e)),
    };
    if target.is_superuser {
        return Ok(bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "The superuser account cannot be deleted",
        ));
    }

    match storage.delete_user(user_id).await {
        Ok(true) => {
            RequireJWT::drop_sessions(request, user_id).await;
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    TargetRef::new(TargetKind::Account, user_id),
                    target.username,
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Account deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::UserNotFound, "Account not found")),
        Err(e) => Ok(storage_error("Account deletion failed", e)),
    }
}
