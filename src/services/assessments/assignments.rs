use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;

use super::AssessmentService;
use crate::models::assessments::requests::{
    AssignmentListQuery, CreateAssignmentRequest, GradeSubmissionRequest,
    StudentAssignmentListQuery, SubmitAssignmentRequest, UpdateAssignmentRequest,
};
use crate::models::audit::entities::AuditAction;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::scope::{ensure_student_visible, narrow, visible_student_ids};
use crate::services::{bad_request, current_user, not_found, storage_error};

const MAX_TITLE_LEN: usize = 200;

fn check_assignment_fields(
    title: Option<&str>,
    max_score: Option<i32>,
    weight: Option<i32>,
) -> Result<(), HttpResponse> {
    if let Some(title) = title {
        let len = title.trim().chars().count();
        if len == 0 || len > MAX_TITLE_LEN {
            return Err(bad_request(
                ErrorCode::ValidationFailed,
                format!("Title must be 1-{MAX_TITLE_LEN} characters"),
            ));
        }
    }
    if max_score.is_some_and(|s| s < 0) {
        return Err(bad_request(
            ErrorCode::ValidationFailed,
            "Max score cannot be negative",
        ));
    }
    if weight.is_some_and(|w| !(1..=100).contains(&w)) {
        return Err(bad_request(
            ErrorCode::ValidationFailed,
            "Weight must be between 1 and 100",
        ));
    }
    Ok(())
}

pub async fn create_assignment(
    service: &AssessmentService,
    body: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) =
        check_assignment_fields(Some(&body.title), Some(body.max_score), Some(body.weight))
    {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.create_assignment(body).await {
        Ok(created) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::Assignment, created.assignment.id),
                    created.assignment.title.clone(),
                )
                .with_details(json!({
                    "class_assignment_id": created.assignment.class_assignment_id,
                    "student_assignments_created": created.student_assignments_created,
                })),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                created,
                "Assignment created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Assignment creation failed", e)),
    }
}

pub async fn get_assignment(
    service: &AssessmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(id).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found")),
        Err(e) => Ok(storage_error("Failed to get assignment", e)),
    }
}

pub async fn list_assignments(
    service: &AssessmentService,
    query: AssignmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_assignments_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Assignment list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list assignments", e)),
    }
}

pub async fn update_assignment(
    service: &AssessmentService,
    id: i64,
    body: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_assignment_fields(body.title.as_deref(), body.max_score, body.weight) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.update_assignment(id, body).await {
        Ok(Some(assignment)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::Assignment, assignment.id),
                    assignment.title.clone(),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                assignment,
                "Assignment updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found")),
        Err(e) => Ok(storage_error("Failed to update assignment", e)),
    }
}

pub async fn delete_assignment(
    service: &AssessmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_assignment(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    TargetRef::new(TargetKind::Assignment, id),
                    format!("Assignment #{id}"),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found")),
        Err(e) => Ok(storage_error("Failed to delete assignment", e)),
    }
}

pub async fn list_submissions(
    service: &AssessmentService,
    assignment_id: i64,
    mut query: StudentAssignmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::AssignmentNotFound, "Assignment not found")),
        Err(e) => return Ok(storage_error("Failed to get assignment", e)),
    }

    query.assignment_id = Some(assignment_id);
    query.student_ids = match visible_student_ids(&storage, &user).await {
        Ok(visible) => narrow(query.student_id, visible),
        Err(resp) => return Ok(resp),
    };

    match storage.list_student_assignments_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Submission list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list submissions", e)),
    }
}

pub async fn get_submission(
    service: &AssessmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let submission = match storage.get_student_assignment_by_id(id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => return Ok(not_found(ErrorCode::AssignmentNotFound, "Submission not found")),
        Err(e) => return Ok(storage_error("Failed to get submission", e)),
    };
    if let Err(resp) = ensure_student_visible(&storage, &user, submission.student_id).await {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submission,
        "Submission retrieved successfully",
    )))
}

/// 学生（或其家长）提交作业；逾期提交记为 LATE
pub async fn submit_assignment(
    service: &AssessmentService,
    id: i64,
    body: SubmitAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let submission = match storage.get_student_assignment_by_id(id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => return Ok(not_found(ErrorCode::AssignmentNotFound, "Submission not found")),
        Err(e) => return Ok(storage_error("Failed to get submission", e)),
    };
    if let Err(resp) = ensure_student_visible(&storage, &actor, submission.student_id).await {
        return Ok(resp);
    }

    let submitted_on = body.submitted_on.unwrap_or_else(|| Utc::now().date_naive());
    match storage.submit_student_assignment(id, submitted_on).await {
        Ok(Some(submission)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::StudentAssignment, submission.id),
                    format!("Submission of student #{}", submission.student_id),
                )
                .with_details(json!({ "status": submission.status.as_str() })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Assignment submitted successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::AssignmentNotFound, "Submission not found")),
        Err(e) => Ok(storage_error("Failed to submit assignment", e)),
    }
}

pub async fn grade_submission(
    service: &AssessmentService,
    id: i64,
    body: GradeSubmissionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if body.score < Decimal::ZERO {
        return Ok(bad_request(ErrorCode::ValidationFailed, "Score cannot be negative"));
    }
    let storage = service.get_storage(request);

    let score = body.score;
    match storage.grade_student_assignment(id, body).await {
        Ok(Some(submission)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::StudentAssignment, submission.id),
                    format!("Submission of student #{}", submission.student_id),
                )
                .with_details(json!({ "score": score.to_string() })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Submission graded successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::AssignmentNotFound, "Submission not found")),
        Err(e) => Ok(storage_error("Failed to grade submission", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_field_bounds() {
        assert!(check_assignment_fields(Some("Fractions worksheet"), Some(20), Some(10)).is_ok());
        assert!(check_assignment_fields(None, None, None).is_ok());
        assert!(check_assignment_fields(Some(""), None, None).is_err());
        assert!(check_assignment_fields(None, Some(-1), None).is_err());
        assert!(check_assignment_fields(None, None, Some(0)).is_err());
        assert!(check_assignment_fields(None, None, Some(101)).is_err());
    }
}
