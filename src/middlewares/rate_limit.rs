/*!
 * 速率限制中间件
 *
 * 对登录与令牌刷新等未认证端点按客户端 IP 计数，已认证请求按账号计数。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 *
 * 超过限制返回 429，并带 `Retry-After` 头。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ConnectionInfo, ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::HeaderMap,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use super::create_error_response;
use crate::models::{ErrorCode, users::entities::User};

// 键: {prefix}:{ip|user}，值: 窗口内请求数
static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(60))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64, key_prefix: &'static str) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix,
        }
    }

    /// 登录：5 次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60, "login")
    }

    /// 刷新令牌：10 次/分钟/IP
    pub fn refresh_token() -> Self {
        Self::new(10, 60, "refresh")
    }

    /// 批量写入（考勤汇总重算、成绩单生成）：20 次/分钟/账号
    pub fn bulk_write() -> Self {
        Self::new(20, 60, "bulk")
    }
}

/// 客户端 IP
///
/// 优先使用连接信息；反向代理场景下再依次尝试 X-Forwarded-For 的第一项和 X-Real-IP。
/// 无法解析为合法 IP 的头会被忽略。
pub fn client_ip(conn: &ConnectionInfo, headers: &HeaderMap) -> Option<String> {
    let connection_ip = conn.realip_remote_addr().map(|s| s.to_string());
    if let Some(ref ip) = connection_ip
        && ip.parse::<IpAddr>().is_ok()
    {
        return connection_ip;
    }

    let forwarded = headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next());
    let real_ip = headers.get("X-Real-IP").and_then(|v| v.to_str().ok());

    [forwarded, real_ip]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|ip| ip.parse::<IpAddr>().is_ok())
        .map(str::to_string)
        .or(connection_ip)
}

fn limit_key(prefix: &str, req: &ServiceRequest) -> String {
    let identifier = match req.extensions().get::<User>() {
        Some(user) => format!("user:{}", user.id),
        None => format!(
            "ip:{}",
            client_ip(&req.connection_info(), req.headers()).unwrap_or_else(|| "unknown".into())
        ),
    };
    format!("{prefix}:{identifier}")
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = limit_key(limit.key_prefix, &req);
            let count = RATE_LIMIT_CACHE.get(&key).await.unwrap_or(0);

            if count >= limit.max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    key, count, limit.max_requests
                );
                let mut response = create_error_response(
                    StatusCode::TOO_MANY_REQUESTS,
                    ErrorCode::RateLimitExceeded,
                    "Too many requests, please try again later",
                );
                if let Ok(value) = limit.window_secs.to_string().parse() {
                    response
                        .headers_mut()
                        .insert(actix_web::http::header::RETRY_AFTER, value);
                }
                return Ok(req.into_response(response.map_into_right_body()));
            }

            RATE_LIMIT_CACHE.insert(key, count + 1).await;
            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");
        assert_eq!(RateLimit::refresh_token().max_requests, 10);
        assert_eq!(RateLimit::bulk_write().key_prefix, "bulk");
    }

    #[test]
    fn test_client_ip_falls_back_to_forwarded_header() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_http_request();
        let ip = client_ip(&req.connection_info(), req.headers());
        assert_eq!(ip.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_client_ip_ignores_garbage_headers() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:5000".parse().unwrap())
            .insert_header(("X-Real-IP", "not-an-ip"))
            .to_http_request();
        let ip = client_ip(&req.connection_info(), req.headers());
        assert_eq!(ip.as_deref(), Some("192.0.2.10"));
    }
}
