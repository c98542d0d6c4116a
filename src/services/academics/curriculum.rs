use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::AcademicService;
use crate::models::academics::requests::{
    ClassAssignmentListQuery, CreateClassAssignmentRequest, CreateSubjectRequest,
    SubjectListQuery, UpdateClassAssignmentRequest, UpdateSubjectRequest,
};
use crate::models::audit::entities::AuditAction;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{bad_request, check_academic_year, current_user, not_found, storage_error};

const MAX_SUBJECT_NAME_LEN: usize = 100;
const MAX_SUBJECT_CODE_LEN: usize = 20;

fn check_subject_fields(name: Option<&str>, code: Option<&str>) -> Result<(), HttpResponse> {
    if let Some(name) = name {
        let len = name.trim().chars().count();
        if len == 0 || len > MAX_SUBJECT_NAME_LEN {
            return Err(bad_request(
                ErrorCode::ValidationFailed,
                format!("Subject name must be 1-{MAX_SUBJECT_NAME_LEN} characters"),
            ));
        }
    }
    if let Some(code) = code {
        let len = code.trim().chars().count();
        if len == 0 || len > MAX_SUBJECT_CODE_LEN {
            return Err(bad_request(
                ErrorCode::ValidationFailed,
                format!("Subject code must be 1-{MAX_SUBJECT_CODE_LEN} characters"),
            ));
        }
    }
    Ok(())
}

pub async fn create_subject(
    service: &AcademicService,
    body: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_subject_fields(Some(&body.name), Some(&body.code)) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.create_subject(body).await {
        Ok(subject) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::Subject, subject.id),
                    format!("{} ({})", subject.name, subject.code),
                ),
            )
            .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => Ok(storage_error("Subject creation failed", e)),
    }
}

pub async fn get_subject(
    service: &AcademicService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_subject_by_id(id).await {
        Ok(Some(subject)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subject,
            "Subject retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "Subject not found")),
        Err(e) => Ok(storage_error("Failed to get subject", e)),
    }
}

pub async fn list_subjects(
    service: &AcademicService,
    query: SubjectListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list subjects", e)),
    }
}

pub async fn update_subject(
    service: &AcademicService,
    id: i64,
    body: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_subject_fields(body.name.as_deref(), body.code.as_deref()) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.update_subject(id, body).await {
        Ok(Some(subject)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::Subject, subject.id),
                    format!("{} ({})", subject.name, subject.code),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(subject, "Subject updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "Subject not found")),
        Err(e) => Ok(storage_error("Failed to update subject", e)),
    }
}

pub async fn delete_subject(
    service: &AcademicService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_subject(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    TargetRef::new(TargetKind::Subject, id),
                    format!("Subject #{id}"),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::NotFound, "Subject not found")),
        Err(e) => Ok(storage_error("Failed to delete subject", e)),
    }
}

pub async fn create_class_assignment(
    service: &AcademicService,
    body: CreateClassAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_academic_year(&body.academic_year) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.create_class_assignment(body).await {
        Ok(assignment) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::ClassAssignment, assignment.id),
                    format!(
                        "{} {}",
                        assignment.class_level.as_str(),
                        assignment.academic_year
                    ),
                )
                .with_details(json!({
                    "subject_id": assignment.subject_id,
                    "teacher_id": assignment.teacher_id,
                })),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Class assignment created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Class assignment creation failed", e)),
    }
}

pub async fn get_class_assignment(
    service: &AcademicService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_assignment_by_id(id).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Class assignment retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "Class assignment not found")),
        Err(e) => Ok(storage_error("Failed to get class assignment", e)),
    }
}

pub async fn list_class_assignments(
    service: &AcademicService,
    query: ClassAssignmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(year) = query.academic_year.as_deref()
        && let Err(resp) = check_academic_year(year)
    {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.list_class_assignments_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Class assignment list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list class assignments", e)),
    }
}

pub async fn update_class_assignment(
    service: &AcademicService,
    id: i64,
    body: UpdateClassAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Some(year) = body.academic_year.as_deref()
        && let Err(resp) = check_academic_year(year)
    {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.update_class_assignment(id, body).await {
        Ok(Some(assignment)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::ClassAssignment, assignment.id),
                    format!(
                        "{} {}",
                        assignment.class_level.as_str(),
                        assignment.academic_year
                    ),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                assignment,
                "Class assignment updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "Class assignment not found")),
        Err(e) => Ok(storage_error("Failed to update class assignment", e)),
    }
}

pub async fn delete_class_assignment(
    service: &AcademicService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_class_assignment(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    TargetRef::new(TargetKind::ClassAssignment, id),
                    format!("Class assignment #{id}"),
                ),
            )
            .await;
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Class assignment deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::NotFound, "Class assignment not found")),
        Err(e) => Ok(storage_error("Failed to delete class assignment", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_fields_are_bounded() {
        assert!(check_subject_fields(Some("Mathematics"), Some("MATH")).is_ok());
        assert!(check_subject_fields(None, None).is_ok());
        assert!(check_subject_fields(Some("   "), None).is_err());
        assert!(check_subject_fields(None, Some(&"X".repeat(21))).is_err());
    }
}
