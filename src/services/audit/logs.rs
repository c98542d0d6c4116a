use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuditService;
use crate::models::ApiResponse;
use crate::models::audit::requests::{AdminLogListQuery, AuditLogListQuery};
use crate::services::storage_error;

pub async fn list_audit_logs(
    service: &AuditService,
    query: AuditLogListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_audit_logs_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Audit logs retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list audit logs", e)),
    }
}

pub async fn list_admin_logs(
    service: &AuditService,
    query: AdminLogListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_admin_action_logs_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Admin action logs retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list admin action logs", e)),
    }
}
