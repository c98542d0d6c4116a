use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::FeeService;
use crate::models::audit::entities::AuditAction;
use crate::models::fees::requests::{
    CreateFeeCategoryRequest, FeeCategoryListQuery, UpdateFeeCategoryRequest,
};
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{bad_request, current_user, not_found, storage_error};

// 仅适用于部分年级的类别必须列出年级
fn check_scope(applies_to_all: bool, levels_empty: bool) -> Result<(), HttpResponse> {
    if !applies_to_all && levels_empty {
        return Err(bad_request(
            ErrorCode::ValidationFailed,
            "class_levels is required when the category does not apply to all classes",
        ));
    }
    Ok(())
}

pub async fn create_category(
    service: &FeeService,
    body: CreateFeeCategoryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_scope(body.applies_to_all, body.class_levels.is_empty()) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.create_fee_category(body).await {
        Ok(category) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::FeeCategory, category.id),
                    category.name.as_str().to_string(),
                ),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                category,
                "Fee category created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Fee category creation failed", e)),
    }
}

pub async fn get_category(
    service: &FeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_fee_category_by_id(id).await {
        Ok(Some(category)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            category,
            "Fee category retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "Fee category not found")),
        Err(e) => Ok(storage_error("Failed to get fee category", e)),
    }
}

pub async fn list_categories(
    service: &FeeService,
    query: FeeCategoryListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_fee_categories_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Fee category list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list fee categories", e)),
    }
}

pub async fn update_category(
    service: &FeeService,
    id: i64,
    body: UpdateFeeCategoryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let existing = match storage.get_fee_category_by_id(id).await {
        Ok(Some(category)) => category,
        Ok(None) => return Ok(not_found(ErrorCode::NotFound, "Fee category not found")),
        Err(e) => return Ok(storage_error("Failed to get fee category", e)),
    };
    let applies_to_all = body.applies_to_all.unwrap_or(existing.applies_to_all);
    let levels_empty = body
        .class_levels
        .as_ref()
        .map_or(existing.class_levels.is_empty(), Vec::is_empty);
    if let Err(resp) = check_scope(applies_to_all, levels_empty) {
        return Ok(resp);
    }

    let details = json!({ "is_active": body.is_active, "is_mandatory": body.is_mandatory });
    match storage.update_fee_category(id, body).await {
        Ok(Some(category)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::FeeCategory, category.id),
                    category.name.as_str().to_string(),
                )
                .with_details(details),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                category,
                "Fee category updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "Fee category not found")),
        Err(e) => Ok(storage_error("Failed to update fee category", e)),
    }
}

pub async fn delete_category(
    service: &FeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_fee_category(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    TargetRef::new(TargetKind::FeeCategory, id),
                    format!("Fee category #{id}"),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Fee category deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::NotFound, "Fee category not found")),
        Err(e) => Ok(storage_error("Failed to delete fee category", e)),
    }
}
