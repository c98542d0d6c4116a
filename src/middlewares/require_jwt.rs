/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>` 中的 access token，并把账号放入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/api/v1/students")
 *         .wrap(RequireJWT)
 *         .route("", web::get().to(list_students)),
 * )
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_user(&req)` 取得当前账号。
 *
 * ## 会话缓存
 *
 * 账号 JSON 以 `session:{user_id}:{token}` 为键缓存；注销或账号变更时
 * 通过 [`RequireJWT::drop_sessions`] 删除该账号的全部会话。
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::jwt::{JwtUtils, TokenKind};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

pub fn session_key(user_id: i64, token: &str) -> String {
    format!("session:{user_id}:{token}")
}

pub fn session_prefix(user_id: i64) -> String {
    format!("session:{user_id}:")
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
}

// 提取并验证 access token，返回当前账号
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, String> {
    let token = bearer_token(req)
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify(token, TokenKind::Access).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;
    let key = session_key(claims.sub, token);

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .ok_or_else(|| "Session cache unavailable".to_string())?
        .get_ref()
        .clone();

    match cache.get_raw(&key).await {
        CacheResult::Found(json) => match serde_json::from_str::<User>(&json) {
            Ok(user) => return Ok(user),
            Err(_) => {
                cache.remove(&key).await;
                debug!("Dropping unreadable session entry for user {}", claims.sub);
            }
        },
        _ => debug!("Session cache miss for user {}", claims.sub),
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage unavailable".to_string())?
        .get_ref()
        .clone();

    let user = storage
        .get_user_by_id(claims.sub)
        .await
        .map_err(|_| "Failed to retrieve account from storage".to_string())?
        .ok_or_else(|| "Account not found".to_string())?;

    if !user.is_active {
        return Err("Account is not active".to_string());
    }

    if let Ok(user_json) = serde_json::to_string(&user) {
        cache
            .insert_raw(key, user_json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前账号；只能在挂载了 RequireJWT 的路由中使用
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    /// 删除账号的全部缓存会话
    pub async fn drop_sessions(req: &actix_web::HttpRequest, user_id: i64) {
        if let Some(cache) = req.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
            cache.remove_by_prefix(&session_prefix(user_id)).await;
            debug!("Dropped cached sessions of account {}", user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_keys_share_account_prefix() {
        let key = session_key(42, "abc.def");
        assert_eq!(key, "session:42:abc.def");
        assert!(key.starts_with(&session_prefix(42)));
        assert!(!session_key(421, "x").starts_with(&session_prefix(42)));
    }
}
