use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GroupService;
use crate::models::audit::entities::AuditAction;
use crate::models::groups::requests::{GroupListQuery, GroupRequest};
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{bad_request, current_user, not_found, storage_error};

const MAX_GROUP_NAME_LEN: usize = 150;

fn check_group_name(name: &str) -> Result<&str, HttpResponse> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_GROUP_NAME_LEN {
        return Err(bad_request(
            ErrorCode::ValidationFailed,
            "Group name must be between 1 and 150 characters",
        ));
    }
    Ok(name)
}

pub async fn create_group(
    service: &GroupService,
    body: GroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let name = match check_group_name(&body.name) {
        Ok(name) => name,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.create_group(name).await {
        Ok(group) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::Group, group.id),
                    group.name.clone(),
                ),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(group, "Group created successfully")))
        }
        Err(e) => Ok(storage_error("Group creation failed", e)),
    }
}

pub async fn list_groups(
    service: &GroupService,
    query: GroupListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_groups_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "Group list retrieved"))),
        Err(e) => Ok(storage_error("Failed to list groups", e)),
    }
}

pub async fn get_group(
    service: &GroupService,
    group_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_group_detail(group_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Group retrieved"))),
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "Group not found")),
        Err(e) => Ok(storage_error("Failed to get group", e)),
    }
}

pub async fn rename_group(
    service: &GroupService,
    group_id: i64,
    body: GroupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let name = match check_group_name(&body.name) {
        Ok(name) => name,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.rename_group(group_id, name).await {
        Ok(Some(group)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::Group, group.id),
                    group.name.clone(),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(group, "Group renamed successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "Group not found")),
        Err(e) => Ok(storage_error("Failed to rename group", e)),
    }
}

/// 删除用户组；成员关系与组权限随之级联删除
pub async fn delete_group(
    service: &GroupService,
    group_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_group(group_id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    TargetRef::new(TargetKind::Group, group_id),
                    format!("Group #{group_id}"),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Group deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::NotFound, "Group not found")),
        Err(e) => Ok(storage_error("Failed to delete group", e)),
    }
}
