//! 账号的用户组与直接权限

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::audit::entities::AuditAction;
use crate::models::users::requests::{SetUserGroupsRequest, UserPermissionsRequest};
use crate::models::users::responses::UserPermissionsResponse;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{current_user, not_found, storage_error};

async fn ensure_account(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> Result<String, HttpResponse> {
    match service.get_storage(request).get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(user.username),
        Ok(None) => Err(not_found(ErrorCode::UserNotFound, "Account not found")),
        Err(e) => Err(storage_error("Failed to get account", e)),
    }
}

pub async fn set_user_groups(
    service: &UserService,
    user_id: i64,
    body: SetUserGroupsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let username = match ensure_account(service, user_id, request).await {
        Ok(name) => name,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.set_user_groups(user_id, body.group_ids.clone()).await {
        Ok(groups) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::Account, user_id),
                    username,
                )
                .with_details(json!({ "group_ids": body.group_ids })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(groups, "Account groups updated")))
        }
        Err(e) => Ok(storage_error("Failed to set account groups", e)),
    }
}

pub async fn get_user_permissions(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = ensure_account(service, user_id, request).await {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    let groups = match storage.list_user_groups(user_id).await {
        Ok(groups) => groups,
        Err(e) => return Ok(storage_error("Failed to list account groups", e)),
    };
    let direct = match storage.list_user_direct_permissions(user_id).await {
        Ok(perms) => perms,
        Err(e) => return Ok(storage_error("Failed to list account permissions", e)),
    };
    let effective = match storage.list_effective_codenames(user_id).await {
        Ok(codenames) => codenames,
        Err(e) => return Ok(storage_error("Failed to list effective permissions", e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserPermissionsResponse {
            user_id,
            groups,
            direct,
            effective,
        },
        "Account permissions retrieved successfully",
    )))
}

async fn change_permissions(
    service: &UserService,
    user_id: i64,
    body: UserPermissionsRequest,
    grant: bool,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let username = match ensure_account(service, user_id, request).await {
        Ok(name) => name,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let result = if grant {
        storage
            .grant_user_permissions(user_id, body.permission_ids.clone())
            .await
    } else {
        storage
            .revoke_user_permissions(user_id, body.permission_ids.clone())
            .await
    };

    match result {
        Ok(direct) => {
            RequireJWT::drop_sessions(request, user_id).await;
            let key = if grant { "granted" } else { "revoked" };
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::Account, user_id),
                    username,
                )
                .with_details(json!({ key: body.permission_ids })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(direct, "Account permissions updated")))
        }
        Err(e) => Ok(storage_error("Failed to update account permissions", e)),
    }
}

pub async fn grant_user_permissions(
    service: &UserService,
    user_id: i64,
    body: UserPermissionsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    change_permissions(service, user_id, body, true, request).await
}

pub async fn revoke_user_permissions(
    service: &UserService,
    user_id: i64,
    body: UserPermissionsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    change_permissions(service, user_id, body, false, request).await
}
