use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::AcademicService;
use crate::models::academics::entities::{AcademicTerm, AttendancePeriod};
use crate::models::academics::requests::{
    CreatePeriodRequest, CreateTermRequest, PeriodListQuery, TermListQuery, UpdatePeriodRequest,
    UpdateTermRequest,
};
use crate::models::academics::responses::{LoadPeriodsResponse, PeriodOption};
use crate::models::audit::entities::AuditAction;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::{check_academic_year, check_term, current_user, not_found, storage_error};

fn term_repr(term: &AcademicTerm) -> String {
    format!("Term {} {}", term.term, term.academic_year)
}

fn period_repr(period: &AttendancePeriod) -> String {
    format!(
        "{} {} - {}",
        period.period_type.display_name(),
        period.start_date,
        period.end_date
    )
}

pub async fn create_term(
    service: &AcademicService,
    body: CreateTermRequest,
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

    match storage.create_term(body).await {
        Ok(term) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::AcademicTerm, term.id),
                    term_repr(&term),
                )
                .with_details(json!({ "is_active": term.is_active })),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(term, "Term created successfully")))
        }
        Err(e) => Ok(storage_error("Term creation failed", e)),
    }
}

pub async fn get_term(
    service: &AcademicService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_term_by_id(id).await {
        Ok(Some(term)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            term,
            "Term retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TermNotFound, "Term not found")),
        Err(e) => Ok(storage_error("Failed to get term", e)),
    }
}

pub async fn get_active_term(
    service: &AcademicService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_active_term().await {
        Ok(Some(term)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            term,
            "Active term retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TermNotFound, "No active term")),
        Err(e) => Ok(storage_error("Failed to get active term", e)),
    }
}

pub async fn list_terms(
    service: &AcademicService,
    query: TermListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(year) = query.academic_year.as_deref()
        && let Err(resp) = check_academic_year(year)
    {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.list_terms_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Term list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list terms", e)),
    }
}

pub async fn update_term(
    service: &AcademicService,
    id: i64,
    body: UpdateTermRequest,
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
    if let Some(term) = body.term
        && let Err(resp) = check_term(term)
    {
        return Ok(resp);
    }
    let storage = service.get_storage(request);

    match storage.update_term(id, body).await {
        Ok(Some(term)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    TargetRef::new(TargetKind::AcademicTerm, term.id),
                    term_repr(&term),
                )
                .with_details(json!({ "is_active": term.is_active })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(term, "Term updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::TermNotFound, "Term not found")),
        Err(e) => Ok(storage_error("Failed to update term", e)),
    }
}

pub async fn delete_term(
    service: &AcademicService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_term(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    TargetRef::new(TargetKind::AcademicTerm, id),
                    format!("Term #{id}"),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Term deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::TermNotFound, "Term not found")),
        Err(e) => Ok(storage_error("Failed to delete term", e)),
    }
}

pub async fn create_period(
    service: &AcademicService,
    body: CreatePeriodRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.create_period(body).await {
        Ok(period) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::AttendancePeriod, period.id),
                    period_repr(&period),
                )
                .with_details(json!({ "term_id": period.term_id })),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                period,
                "Attendance period created successfully",
            )))
        }
        Err(e) => Ok(storage_error("Attendance period creation failed", e)),
    }
}

pub async fn get_period(
    service: &AcademicService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_period_by_id(id).await {
        Ok(Some(period)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            period,
            "Attendance period retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PeriodNotFound, "Attendance period not found")),
        Err(e) => Ok(storage_error("Failed to get attendance period", e)),
    }
}

pub async fn list_periods(
    service: &AcademicService,
    query: PeriodListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_periods_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Attendance period list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list attendance periods", e)),
    }
}

pub async fn update_period(
    service: &AcademicService,
    id: i64,
    body: UpdatePeriodRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let lock_change = body.is_locked;
    match storage.update_period(id, body).await {
        Ok(Some(period)) => {
            let mut entry = Activity::new(
                AuditAction::Update,
                TargetRef::new(TargetKind::AttendancePeriod, period.id),
                period_repr(&period),
            );
            if let Some(locked) = lock_change {
                entry = entry.with_details(json!({ "is_locked": locked }));
            }
            activity::record(&storage, request, &actor, entry).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                period,
                "Attendance period updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::PeriodNotFound, "Attendance period not found")),
        Err(e) => Ok(storage_error("Failed to update attendance period", e)),
    }
}

pub async fn delete_period(
    service: &AcademicService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_period(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    TargetRef::new(TargetKind::AttendancePeriod, id),
                    format!("Attendance period #{id}"),
                ),
            )
            .await;
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Attendance period deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::PeriodNotFound, "Attendance period not found")),
        Err(e) => Ok(storage_error("Failed to delete attendance period", e)),
    }
}

/// 未知学期返回空列表
pub async fn load_periods(
    service: &AcademicService,
    term_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.load_periods(term_id).await {
        Ok(periods) => {
            let response = LoadPeriodsResponse {
                term_id,
                periods: periods.iter().map(PeriodOption::from).collect(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Attendance periods loaded successfully",
            )))
        }
        Err(e) => Ok(storage_error("Failed to load attendance periods", e)),
    }
}
