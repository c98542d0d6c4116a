use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use super::AssessmentService;
use crate::models::assessments::entities::Grade;
use crate::models::assessments::requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest};
use crate::models::audit::entities::AuditAction;
use crate::models::notifications::entities::NotificationType;
use crate::models::notifications::requests::CreateNotificationRequest;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::scope::{ensure_student_visible, narrow, visible_student_ids};
use crate::services::{check_academic_year, check_term, current_user, not_found, storage_error};
use crate::storage::Storage;

fn grade_target(id: i64) -> TargetRef {
    TargetRef::new(TargetKind::Grade, id)
}

fn grade_repr(grade: &Grade) -> String {
    format!(
        "Grade of student #{} for {} term {}",
        grade.student_id, grade.academic_year, grade.term
    )
}

/// 新成绩通知学生本人账号；失败只记日志
async fn notify_student(storage: &Arc<dyn Storage>, grade: &Grade) {
    let student = match storage.get_student_by_id(grade.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return,
        Err(e) => {
            warn!("Failed to load student {} for grade notification: {}", grade.student_id, e);
            return;
        }
    };
    let notification = CreateNotificationRequest {
        recipient_id: student.user_id,
        notification_type: NotificationType::Grade,
        title: "New grade recorded".to_string(),
        message: format!(
            "A grade of {} ({}) was recorded for {} term {}.",
            grade.total_score, grade.ges_grade, grade.academic_year, grade.term
        ),
        target: Some(grade_target(grade.id)),
    };
    if let Err(e) = storage.create_notification(notification).await {
        warn!("Failed to notify account {} of grade {}: {}", student.user_id, grade.id, e);
    }
}

pub async fn create_grade(
    service: &AssessmentService,
    mut body: CreateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_academic_year(&body.academic_year) {
        return Ok(resp);
    }
    if let Err(resp) = check_term(body.term) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    body.recorded_by = Some(actor.id);
    match storage.create_grade(body).await {
        Ok(grade) => {
            notify_student(&storage, &grade).await;
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(AuditAction::Create, grade_target(grade.id), grade_repr(&grade))
                    .with_details(json!({
                        "subject_id": grade.subject_id,
                        "total_score": grade.total_score.to_string(),
                        "ges_grade": grade.ges_grade,
                    })),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade created successfully")))
        }
        Err(e) => Ok(storage_error("Grade creation failed", e)),
    }
}

pub async fn get_grade(
    service: &AssessmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let grade = match storage.get_grade_by_id(id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => return Ok(storage_error("Failed to get grade", e)),
    };
    if let Err(resp) = ensure_student_visible(&storage, &user, grade.student_id).await {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade retrieved successfully")))
}

pub async fn list_grades(
    service: &AssessmentService,
    mut query: GradeListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Some(year) = query.academic_year.as_deref()
        && let Err(resp) = check_academic_year(year)
    {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    query.student_ids = match visible_student_ids(&storage, &user).await {
        Ok(visible) => narrow(query.student_id, visible),
        Err(resp) => return Ok(resp),
    };

    match storage.list_grades_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Grade list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list grades", e)),
    }
}

pub async fn update_grade(
    service: &AssessmentService,
    id: i64,
    body: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.update_grade(id, body).await {
        Ok(Some(grade)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(AuditAction::Update, grade_target(grade.id), grade_repr(&grade))
                    .with_details(json!({
                        "total_score": grade.total_score.to_string(),
                        "ges_grade": grade.ges_grade,
                    })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(storage_error("Failed to update grade", e)),
    }
}

pub async fn delete_grade(
    service: &AssessmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_grade(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(AuditAction::Delete, grade_target(id), format!("Grade #{id}")),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Grade deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(storage_error("Failed to delete grade", e)),
    }
}
