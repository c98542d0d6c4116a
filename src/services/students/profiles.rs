use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use tracing::info;

use super::StudentService;
use crate::models::audit::entities::AuditAction;
use crate::models::students::requests::{
    CreateStudentRequest, StudentListQuery, UpdateStudentRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::scope::{ensure_student_visible, visible_student_ids};
use crate::services::{bad_request, current_user, not_found, storage_error};

fn student_target(id: i64) -> TargetRef {
    TargetRef::new(TargetKind::Student, id)
}

fn check_names(first: Option<&str>, last: Option<&str>) -> Result<(), HttpResponse> {
    for name in [first, last].into_iter().flatten() {
        if name.trim().is_empty() {
            return Err(bad_request(ErrorCode::ValidationFailed, "Name cannot be empty"));
        }
    }
    Ok(())
}

pub async fn create_student(
    service: &StudentService,
    body: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_names(Some(&body.first_name), Some(&body.last_name)) {
        return Ok(resp);
    }
    if body.residential_address.trim().is_empty() {
        return Ok(bad_request(
            ErrorCode::ValidationFailed,
            "Residential address is required",
        ));
    }
    let today = chrono::Utc::now().date_naive();
    if body.date_of_birth >= today {
        return Ok(bad_request(
            ErrorCode::ValidationFailed,
            "Date of birth must be in the past",
        ));
    }

    let storage = service.get_storage(request);

    // 学生档案只能关联学生角色的账号；账号不存在时交给外键约束返回 409
    match storage.get_user_by_id(body.user_id).await {
        Ok(Some(account)) if account.role != UserRole::Student => {
            return Ok(bad_request(
                ErrorCode::ValidationFailed,
                "The linked account must have the student role",
            ));
        }
        Ok(_) => {}
        Err(e) => return Ok(storage_error("Failed to get account", e)),
    }

    match storage.create_student(body).await {
        Ok(student) => {
            info!("Student {} enrolled", student.student_id);
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    student_target(student.id),
                    student.student_id.clone(),
                ),
            )
            .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => Ok(storage_error("Student creation failed", e)),
    }
}

pub async fn get_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_student_visible(&storage, &user, id).await {
        return Ok(resp);
    }

    match storage.get_student_by_id(id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error("Failed to get student", e)),
    }
}

pub async fn list_students(
    service: &StudentService,
    mut query: StudentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    query.ids = match visible_student_ids(&storage, &user).await {
        Ok(ids) => ids,
        Err(resp) => return Ok(resp),
    };

    match storage.list_students_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list students", e)),
    }
}

pub async fn update_student(
    service: &StudentService,
    id: i64,
    body: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_names(body.first_name.as_deref(), body.last_name.as_deref()) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    let details = json!({
        "class_level": body.class_level,
        "is_active": body.is_active,
    });
    match storage.update_student(id, body).await {
        Ok(Some(student)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    student_target(student.id),
                    student.student_id.clone(),
                )
                .with_details(details),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error("Failed to update student", e)),
    }
}

pub async fn deactivate_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.deactivate_student(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    student_target(id),
                    format!("Student #{id}"),
                )
                .with_details(json!({ "soft_delete": true })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deactivated successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error("Failed to deactivate student", e)),
    }
}
