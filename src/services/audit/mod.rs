pub mod logs;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::audit::requests::{AdminLogListQuery, AuditLogListQuery};

super::lazy_storage_service!(AuditService);

impl AuditService {
    pub async fn list_audit_logs(
        &self,
        query: AuditLogListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        logs::list_audit_logs(self, query, request).await
    }

    pub async fn list_admin_logs(
        &self,
        query: AdminLogListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        logs::list_admin_logs(self, query, request).await
    }
}
