use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::TeacherService;
use crate::models::audit::entities::AuditAction;
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{bad_request, current_user, not_found, storage_error};
use crate::utils::validate::{validate_email, validate_phone};

fn teacher_target(id: i64) -> TargetRef {
    TargetRef::new(TargetKind::Teacher, id)
}

fn check_contact(phone: Option<&str>, email: Option<&str>) -> Result<(), HttpResponse> {
    if let Some(phone) = phone {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))?;
    }
    if let Some(email) = email {
        validate_email(email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    }
    Ok(())
}

pub async fn create_teacher(
    service: &TeacherService,
    body: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if body.first_name.trim().is_empty() || body.last_name.trim().is_empty() {
        return Ok(bad_request(ErrorCode::ValidationFailed, "Name cannot be empty"));
    }
    if let Err(resp) = check_contact(Some(&body.phone_number), Some(&body.email)) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.get_user_by_id(body.user_id).await {
        Ok(Some(account)) if account.role != UserRole::Teacher => {
            return Ok(bad_request(
                ErrorCode::ValidationFailed,
                "The linked account must have the teacher role",
            ));
        }
        Ok(_) => {}
        Err(e) => return Ok(storage_error("Failed to get account", e)),
    }

    match storage.create_teacher(body).await {
        Ok(detail) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    teacher_target(detail.teacher.id),
                    format!("{} {}", detail.teacher.first_name, detail.teacher.last_name),
                ),
            )
            .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(detail, "Teacher created successfully")))
        }
        Err(e) => Ok(storage_error("Teacher creation failed", e)),
    }
}

pub async fn get_teacher(
    service: &TeacherService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_by_id(id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Teacher retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(storage_error("Failed to get teacher", e)),
    }
}

pub async fn list_teachers(
    service: &TeacherService,
    query: TeacherListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Teacher list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list teachers", e)),
    }
}

pub async fn update_teacher(
    service: &TeacherService,
    id: i64,
    body: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_contact(body.phone_number.as_deref(), body.email.as_deref()) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    let details = json!({ "class_levels": body.class_levels, "is_active": body.is_active });
    match storage.update_teacher(id, body).await {
        Ok(Some(teacher)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    teacher_target(teacher.id),
                    format!("{} {}", teacher.first_name, teacher.last_name),
                )
                .with_details(details),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(storage_error("Failed to update teacher", e)),
    }
}

pub async fn deactivate_teacher(
    service: &TeacherService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.deactivate_teacher(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(AuditAction::Delete, teacher_target(id), format!("Teacher #{id}"))
                    .with_details(json!({ "soft_delete": true })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Teacher deactivated successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => Ok(storage_error("Failed to deactivate teacher", e)),
    }
}
