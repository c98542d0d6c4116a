use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::GroupService;
use crate::models::audit::entities::AuditAction;
use crate::models::groups::requests::{PermissionListQuery, SetGroupPermissionsRequest};
use crate::models::groups::responses::PermissionListResponse;
use crate::models::{ApiResponse, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{current_user, storage_error};

pub async fn set_group_permissions(
    service: &GroupService,
    group_id: i64,
    body: SetGroupPermissionsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage
        .set_group_permissions(group_id, body.permission_ids.clone())
        .await
    {
        Ok(permissions) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::Group, group_id),
                    format!("Group #{group_id}"),
                )
                .with_details(json!({ "permission_ids": body.permission_ids })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                PermissionListResponse { items: permissions },
                "Group permissions updated",
            )))
        }
        Err(e) => Ok(storage_error("Failed to set group permissions", e)),
    }
}

pub async fn list_permissions(
    service: &GroupService,
    query: PermissionListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_permissions(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PermissionListResponse { items },
            "Permission list retrieved",
        ))),
        Err(e) => Ok(storage_error("Failed to list permissions", e)),
    }
}
