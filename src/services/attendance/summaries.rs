use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::AttendanceService;
use super::records::ensure_teaches_level;
use crate::models::attendance::requests::{RecomputeSummaryRequest, SummaryListQuery};
use crate::models::audit::entities::AuditAction;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::scope::{narrow, visible_student_ids};
use crate::services::{bad_request, current_user, storage_error};

/// 只能二选一：单个学生或整个年级
fn check_recompute_target(body: &RecomputeSummaryRequest) -> Result<(), HttpResponse> {
    match (body.student_id, body.class_level) {
        (None, None) => Err(bad_request(
            ErrorCode::ValidationFailed,
            "Either student_id or class_level is required",
        )),
        (Some(_), Some(_)) => Err(bad_request(
            ErrorCode::ValidationFailed,
            "student_id and class_level cannot be combined",
        )),
        _ => Ok(()),
    }
}

pub async fn recompute_summaries(
    service: &AttendanceService,
    body: RecomputeSummaryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if let Err(resp) = check_recompute_target(&body) {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    if let Some(level) = body.class_level
        && let Err(resp) = ensure_teaches_level(&storage, &actor, level).await
    {
        return Ok(resp);
    }

    let details = json!({
        "term_id": body.term_id,
        "period_id": body.period_id,
        "student_id": body.student_id,
        "class_level": body.class_level.map(|l| l.as_str()),
    });
    let term_id = body.term_id;
    match storage.recompute_summaries(body).await {
        Ok(summaries) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::AcademicTerm, term_id),
                    format!("Attendance summaries of term #{term_id}"),
                )
                .with_details(details),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                summaries,
                "Attendance summaries recomputed successfully",
            )))
        }
        Err(e) => Ok(storage_error("Failed to recompute attendance summaries", e)),
    }
}

pub async fn list_summaries(
    service: &AttendanceService,
    mut query: SummaryListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    query.student_ids = match visible_student_ids(&storage, &user).await {
        Ok(visible) => narrow(query.student_id, visible),
        Err(resp) => return Ok(resp),
    };

    match storage.list_summaries_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Attendance summary list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list attendance summaries", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClassLevel;

    fn request(student_id: Option<i64>, class_level: Option<ClassLevel>) -> RecomputeSummaryRequest {
        RecomputeSummaryRequest {
            term_id: 1,
            period_id: None,
            student_id,
            class_level,
        }
    }

    #[test]
    fn recompute_needs_exactly_one_target() {
        assert!(check_recompute_target(&request(Some(4), None)).is_ok());
        assert!(check_recompute_target(&request(None, Some(ClassLevel::P2))).is_ok());
        assert!(check_recompute_target(&request(None, None)).is_err());
        assert!(check_recompute_target(&request(Some(4), Some(ClassLevel::P2))).is_err());
    }
}
