use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::TeacherService;
use crate::models::audit::entities::AuditAction;
use crate::models::teachers::requests::SetTeacherSubjectsRequest;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{current_user, not_found, storage_error};

pub async fn set_teacher_subjects(
    service: &TeacherService,
    id: i64,
    body: SetTeacherSubjectsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.set_teacher_subjects(id, body.subject_ids.clone()).await {
        Ok(subjects) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::Teacher, id),
                    format!("Teacher #{id}"),
                )
                .with_details(json!({ "subject_ids": body.subject_ids })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(subjects, "Teacher subjects updated")))
        }
        Err(e) => Ok(storage_error("Failed to set teacher subjects", e)),
    }
}

pub async fn list_teacher_subjects(
    service: &TeacherService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
        Err(e) => return Ok(storage_error("Failed to get teacher", e)),
    }

    match storage.list_teacher_subjects(id).await {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Teacher subjects retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list teacher subjects", e)),
    }
}
