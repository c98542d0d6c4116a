use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::audit::requests::{AdminLogListQuery, AuditLogListQuery};
use crate::policy::{Action, Resource};
use crate::services::AuditService;

static AUDIT_SERVICE: Lazy<AuditService> = Lazy::new(AuditService::new_lazy);

pub async fn list_audit_logs(
    req: HttpRequest,
    query: web::Query<AuditLogListQuery>,
) -> ActixResult<HttpResponse> {
    AUDIT_SERVICE.list_audit_logs(query.into_inner(), &req).await
}

pub async fn list_admin_logs(
    req: HttpRequest,
    query: web::Query<AdminLogListQuery>,
) -> ActixResult<HttpResponse> {
    AUDIT_SERVICE.list_admin_logs(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_audit_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/audit-logs")
            .wrap(middleware::Compress::default())
            .wrap(RequirePermission::new(Resource::AuditLog, Action::View))
            .wrap(RequireJWT)
            .route("", web::get().to(list_audit_logs)),
    );
    cfg.service(
        web::scope("/api/v1/admin-logs")
            .wrap(middleware::Compress::default())
            .wrap(RequirePermission::new(Resource::AdminLog, Action::View))
            .wrap(RequireJWT)
            .route("", web::get().to(list_admin_logs)),
    );
}
