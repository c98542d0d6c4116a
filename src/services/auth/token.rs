use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::responses::{RefreshTokenResponse, TokenVerificationResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::{JwtUtils, TokenKind};

use super::AuthService;

fn login_expired() -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::expired_refresh_cookie())
        .json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Login expired or invalid, please login again",
        ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let Some(refresh_token) = JwtUtils::refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let claims = match JwtUtils::verify(&refresh_token, TokenKind::Refresh) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            return Ok(login_expired());
        }
    };

    // 账号被停用或删除后不再续期
    let storage = service.get_storage(request);
    let user = match storage.get_user_by_id(claims.sub).await {
        Ok(Some(user)) if user.is_active => user,
        Ok(_) => return Ok(login_expired()),
        Err(e) => return Ok(crate::services::storage_error("Token refresh failed", e)),
    };

    match JwtUtils::generate_access_token(user.id, user.role.as_str()) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to sign access token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Unable to refresh token",
                )),
            )
        }
    }
}

/// 只校验签名与有效期，不查询账号
pub async fn handle_verify_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let is_valid = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|token| JwtUtils::verify(token, TokenKind::Access).is_ok());

    let message = if is_valid {
        "Token is valid"
    } else {
        "Token is invalid or expired"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid },
        message,
    )))
}
