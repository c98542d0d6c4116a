use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::audit::entities::AuditAction;
use crate::models::{ApiResponse, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::current_user;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 注销：清除 refresh cookie 与该账号的全部缓存会话
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    RequireJWT::drop_sessions(request, user.id).await;

    activity::record(
        &storage,
        request,
        &user,
        Activity::new(
            AuditAction::Logout,
            TargetRef::new(TargetKind::Account, user.id),
            user.username.clone(),
        ),
    )
    .await;

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::expired_refresh_cookie())
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
