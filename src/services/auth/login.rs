use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use crate::models::audit::entities::AuditAction;
use crate::models::auth::{requests::LoginRequest, responses::LoginResponse};
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 按用户名或邮箱查找账号
    let user = match storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(auth_failed()),
        Err(e) => return Ok(crate::services::storage_error("Login failed", e)),
    };

    // 2. 校验密码
    if !verify_password(&login_request.password, &user.password_hash) {
        tracing::info!("Failed login attempt for {}", user.username);
        return Ok(auth_failed());
    }

    if !user.is_active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountInactive,
            "Account is not active",
        )));
    }

    // 3. 签发令牌对；记住我时刷新令牌有效期更长
    let refresh_days = if login_request.remember_me {
        config.jwt.refresh_token_remember_me_expiry
    } else {
        config.jwt.refresh_token_expiry
    };
    let token_pair = match user.generate_token_pair(Some(chrono::Duration::days(refresh_days))) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login of {}: {}", user.id, e);
    }

    activity::record(
        &storage,
        request,
        &user,
        Activity::new(
            AuditAction::Login,
            TargetRef::new(TargetKind::Account, user.id),
            user.username.clone(),
        )
        .with_details(json!({ "remember_me": login_request.remember_me })),
    )
    .await;

    tracing::info!("User {} logged in successfully", user.username);

    let refresh_cookie = JwtUtils::refresh_cookie(&token_pair.refresh_token, refresh_days);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60,
        user,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
