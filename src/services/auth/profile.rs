use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::auth::responses::UserInfoResponse;
use crate::policy;
use crate::services::{current_user, storage_error};

use super::AuthService;

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 管理员拥有全部权限；其他账号返回显式授权（含用户组）
    let permissions = if policy::has_admin_authority(&user) {
        policy::all_permissions()
            .into_iter()
            .map(|(_, codename, _)| codename)
            .collect()
    } else {
        let storage = service.get_storage(request);
        match storage.list_effective_codenames(user.id).await {
            Ok(codenames) => codenames,
            Err(e) => return Ok(storage_error("Failed to load permissions", e)),
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse { user, permissions },
        "User information retrieved successfully",
    )))
}
