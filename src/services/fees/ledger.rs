use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use super::FeeService;
use crate::config::AppConfig;
use crate::models::audit::entities::AuditAction;
use crate::models::fees::requests::{
    CreateFeeRequest, FeeListQuery, FeeSummaryQuery, RecordPaymentRequest, UpdateFeeRequest,
};
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::services::activity::{self, Activity};
use crate::services::scope::{ensure_student_visible, narrow, visible_student_ids};
use crate::services::{bad_request, check_academic_year, current_user, not_found, storage_error};

fn fee_target(id: i64) -> TargetRef {
    TargetRef::new(TargetKind::Fee, id)
}

/// 逾期截止日：due_date 早于该日期且未结清即为逾期
pub(crate) fn overdue_cutoff(today: NaiveDate, grace_days: i64) -> NaiveDate {
    today - Duration::days(grace_days.max(0))
}

pub async fn create_fee(
    service: &FeeService,
    mut body: CreateFeeRequest,
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

    body.recorded_by = Some(actor.id);
    match storage.create_fee(body).await {
        Ok(fee) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    fee_target(fee.id),
                    format!("Fee {} for student #{}", fee.amount_payable, fee.student_id),
                )
                .with_details(json!({
                    "category_id": fee.category_id,
                    "balance": fee.balance.to_string(),
                    "payment_status": fee.payment_status.as_str(),
                })),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(fee, "Fee created successfully")))
        }
        Err(e) => Ok(storage_error("Fee creation failed", e)),
    }
}

pub async fn get_fee(service: &FeeService, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let fee = match storage.get_fee_by_id(id).await {
        Ok(Some(fee)) => fee,
        Ok(None) => return Ok(not_found(ErrorCode::FeeNotFound, "Fee not found")),
        Err(e) => return Ok(storage_error("Failed to get fee", e)),
    };
    if let Err(resp) = ensure_student_visible(&storage, &user, fee.student_id).await {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(fee, "Fee retrieved successfully")))
}

pub async fn list_fees(
    service: &FeeService,
    mut query: FeeListQuery,
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
    if query.overdue.is_some() {
        let grace_days = AppConfig::get().school.fee_grace_days;
        query.overdue_before = Some(overdue_cutoff(Utc::now().date_naive(), grace_days));
    }

    match storage.list_fees_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Fee list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list fees", e)),
    }
}

pub async fn update_fee(
    service: &FeeService,
    id: i64,
    body: UpdateFeeRequest,
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

    match storage.update_fee(id, body).await {
        Ok(Some(fee)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Update,
                    fee_target(fee.id),
                    format!("Fee {} for student #{}", fee.amount_payable, fee.student_id),
                )
                .with_details(json!({
                    "amount_paid": fee.amount_paid.to_string(),
                    "balance": fee.balance.to_string(),
                    "payment_status": fee.payment_status.as_str(),
                })),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(fee, "Fee updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::FeeNotFound, "Fee not found")),
        Err(e) => Ok(storage_error("Failed to update fee", e)),
    }
}

pub async fn delete_fee(
    service: &FeeService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_fee(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(AuditAction::Delete, fee_target(id), format!("Fee #{id}")),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Fee deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::FeeNotFound, "Fee not found")),
        Err(e) => Ok(storage_error("Failed to delete fee", e)),
    }
}

pub async fn record_payment(
    service: &FeeService,
    fee_id: i64,
    mut body: RecordPaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if body.amount <= Decimal::ZERO {
        return Ok(bad_request(
            ErrorCode::ValidationFailed,
            "Payment amount must be greater than zero",
        ));
    }
    let storage = service.get_storage(request);

    body.recorded_by = Some(actor.id);
    match storage.record_payment(fee_id, body).await {
        Ok(Some(recorded)) => {
            info!(
                "Payment {} recorded for fee {}: {}",
                recorded.payment.receipt_number, fee_id, recorded.payment.amount
            );
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Create,
                    TargetRef::new(TargetKind::FeePayment, recorded.payment.id),
                    recorded.payment.receipt_number.clone(),
                )
                .with_details(json!({
                    "fee_id": fee_id,
                    "amount": recorded.payment.amount.to_string(),
                    "balance": recorded.fee.balance.to_string(),
                    "payment_status": recorded.fee.payment_status.as_str(),
                })),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                recorded,
                "Payment recorded successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::FeeNotFound, "Fee not found")),
        Err(e) => Ok(storage_error("Failed to record payment", e)),
    }
}

pub async fn list_payments(
    service: &FeeService,
    fee_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let fee = match storage.get_fee_by_id(fee_id).await {
        Ok(Some(fee)) => fee,
        Ok(None) => return Ok(not_found(ErrorCode::FeeNotFound, "Fee not found")),
        Err(e) => return Ok(storage_error("Failed to get fee", e)),
    };
    if let Err(resp) = ensure_student_visible(&storage, &user, fee.student_id).await {
        return Ok(resp);
    }

    match storage.list_fee_payments(fee_id).await {
        Ok(payments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            payments,
            "Fee payments retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list fee payments", e)),
    }
}

pub async fn student_fee_summary(
    service: &FeeService,
    student_id: i64,
    query: FeeSummaryQuery,
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

    if let Err(resp) = ensure_student_visible(&storage, &user, student_id).await {
        return Ok(resp);
    }
    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(storage_error("Failed to get student", e)),
    }

    match storage.get_student_fee_summary(student_id, query).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            summary,
            "Fee summary retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to get fee summary", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overdue_cutoff_subtracts_grace_days() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(
            overdue_cutoff(today, 7),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
        );
        assert_eq!(overdue_cutoff(today, 0), today);
        assert_eq!(overdue_cutoff(today, -3), today);
    }
}
