/*!
 * 基于策略的访问控制中间件
 *
 * 必须在 RequireJWT 之后使用。按 [`crate::policy::evaluate`] 判定，
 * 角色矩阵未覆盖时再查询账号（含所在用户组）的显式授权。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use crate::middlewares::{RequireJWT, RequirePermission};
 * use crate::policy::{Action, Resource};
 *
 * web::scope("/api/v1/fees")
 *     .wrap(RequirePermission::by_method(Resource::Fee)) // GET=view, POST=add, PUT/PATCH=change, DELETE=delete
 *     .wrap(RequireJWT)
 *
 * web::resource("/{id}/payments")
 *     .wrap(RequirePermission::new(Resource::FeePayment, Action::Add))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{info, warn};

use super::create_error_response;
use crate::models::{ErrorCode, users::entities::User};
use crate::policy::{self, Action, Decision, Resource};
use crate::storage::Storage;

#[derive(Clone)]
pub struct RequirePermission {
    resource: Resource,
    // None 时由 HTTP 方法推断
    action: Option<Action>,
}

impl RequirePermission {
    pub fn new(resource: Resource, action: Action) -> Self {
        Self {
            resource,
            action: Some(action),
        }
    }

    pub fn by_method(resource: Resource) -> Self {
        Self {
            resource,
            action: None,
        }
    }
}

pub fn action_for_method(method: &Method) -> Action {
    match *method {
        Method::POST => Action::Add,
        Method::PUT | Method::PATCH => Action::Change,
        Method::DELETE => Action::Delete,
        _ => Action::View,
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            resource: self.resource,
            action: self.action,
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    resource: Resource,
    action: Option<Action>,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
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
        let resource = self.resource;
        let action = self
            .action
            .unwrap_or_else(|| action_for_method(req.method()));

        Box::pin(async move {
            let Some(user) = req.extensions().get::<User>().cloned() else {
                info!(
                    "Permission check failed: no account on request. Make sure RequireJWT is applied first."
                );
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            let allowed = match policy::evaluate(&user, resource, action) {
                Decision::Allow => true,
                Decision::Deny => false,
                Decision::CheckGrant(codename) => {
                    match req.app_data::<web::Data<Arc<dyn Storage>>>() {
                        Some(storage) => storage
                            .user_has_permission(user.id, resource.as_str(), &codename)
                            .await
                            .unwrap_or_else(|e| {
                                warn!("Permission lookup failed for {}: {}", user.id, e);
                                false
                            }),
                        None => false,
                    }
                }
            };

            if allowed {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            info!(
                "Access denied for account {} ({}): {} {}",
                user.id, user.role, action, resource
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::PermissionDenied,
                    &format!("Permission denied: {}", policy::codename(action, resource)),
                )
                .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_for_method() {
        assert_eq!(action_for_method(&Method::GET), Action::View);
        assert_eq!(action_for_method(&Method::HEAD), Action::View);
        assert_eq!(action_for_method(&Method::POST), Action::Add);
        assert_eq!(action_for_method(&Method::PUT), Action::Change);
        assert_eq!(action_for_method(&Method::PATCH), Action::Change);
        assert_eq!(action_for_method(&Method::DELETE), Action::Delete);
    }
}
