use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use super::AttendanceService;
use crate::models::attendance::requests::{
    AttendanceListQuery, RecordAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::audit::entities::AuditAction;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ClassLevel, ErrorCode, TargetKind, TargetRef};
use crate::policy;
use crate::services::activity::{self, Activity};
use crate::services::scope::{ensure_student_visible, narrow, visible_student_ids};
use crate::services::{current_user, forbidden, not_found, storage_error};
use crate::storage::Storage;

/// 教师账号只能为自己任教的年级记录出勤
pub(crate) async fn ensure_teaches_level(
    storage: &Arc<dyn Storage>,
    user: &User,
    level: ClassLevel,
) -> Result<(), HttpResponse> {
    if policy::has_admin_authority(user) || user.role != UserRole::Teacher {
        return Ok(());
    }
    match storage.get_teacher_by_user_id(user.id).await {
        Ok(Some(teacher)) if teacher.is_active && teacher.teaches(level) => Ok(()),
        Ok(_) => Err(forbidden(&format!(
            "You are not assigned to class level {}",
            level.as_str()
        ))),
        Err(e) => Err(storage_error("Failed to get teacher profile", e)),
    }
}

pub async fn record_attendance(
    service: &AttendanceService,
    mut body: RecordAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_teaches_level(&storage, &actor, body.class_level).await {
        return Ok(resp);
    }

    body.recorded_by = Some(actor.id);
    let level = body.class_level;
    let date = body.date;
    let term_id = body.term_id;
    let period_id = body.period_id;

    match storage.record_attendance(body).await {
        Ok(resp) => {
            info!(
                "Attendance recorded for {} on {}: {} records",
                level.as_str(),
                date,
                resp.records.len()
            );
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::AcademicTerm, term_id),
                    format!("Attendance {} {}", level.as_str(), date),
                )
                .with_details(json!({
                    "class_level": level.as_str(),
                    "date": date,
                    "period_id": period_id,
                    "records": resp.records.len(),
                    "summaries_updated": resp.summaries_updated,
                })),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                resp,
                "Attendance recorded successfully",
            )))
        }
        Err(e) => Ok(storage_error("Attendance recording failed", e)),
    }
}

pub async fn get_attendance(
    service: &AttendanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let record = match storage.get_attendance_by_id(id).await {
        Ok(Some(record)) => record,
        Ok(None) => return Ok(not_found(ErrorCode::NotFound, "Attendance record not found")),
        Err(e) => return Ok(storage_error("Failed to get attendance record", e)),
    };
    if let Err(resp) = ensure_student_visible(&storage, &user, record.student_id).await {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        record,
        "Attendance record retrieved successfully",
    )))
}

pub async fn list_attendance(
    service: &AttendanceService,
    mut query: AttendanceListQuery,
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

    match storage.list_attendance_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Attendance list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list attendance", e)),
    }
}

pub async fn update_attendance(
    service: &AttendanceService,
    id: i64,
    body: UpdateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let details = json!({
        "date": body.date,
        "status": body.status.map(|s| s.as_str()),
        "period_id": body.period_id,
        "clear_period": body.clear_period,
    });
    match storage.update_attendance(id, body).await {
        Ok(Some(record)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::StudentAttendance, record.id),
                    format!("Attendance of student #{} on {}", record.student_id, record.date),
                )
                .with_details(details),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Attendance record updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::NotFound, "Attendance record not found")),
        Err(e) => Ok(storage_error("Failed to update attendance record", e)),
    }
}

pub async fn delete_attendance(
    service: &AttendanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_attendance(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    TargetRef::new(TargetKind::StudentAttendance, id),
                    format!("Attendance record #{id}"),
                ),
            )
            .await;
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Attendance record deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::NotFound, "Attendance record not found")),
        Err(e) => Ok(storage_error("Failed to delete attendance record", e)),
    }
}
