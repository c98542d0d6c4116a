use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde_json::json;
use tracing::info;

use super::AssessmentService;
use crate::models::assessments::entities::ReportCard;
use crate::models::assessments::requests::{
    GenerateReportCardRequest, ReportCardListQuery, UpdateReportCardRequest,
};
use crate::models::audit::entities::AuditAction;
use crate::models::{ApiResponse, ErrorCode, TargetKind, TargetRef};
use crate::policy;
use crate::services::activity::{self, Activity};
use crate::services::scope::{ensure_student_visible, narrow, visible_student_ids};
use crate::services::{check_academic_year, check_term, current_user, not_found, storage_error};

fn card_target(id: i64) -> TargetRef {
    TargetRef::new(TargetKind::ReportCard, id)
}

fn card_repr(card: &ReportCard) -> String {
    format!(
        "Report card of student #{} for {} term {}",
        card.student_id, card.academic_year, card.term
    )
}

/// 生成或重新生成；平均分与等级由该学期成绩计算
pub async fn generate_report_card(
    service: &AssessmentService,
    mut body: GenerateReportCardRequest,
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

    body.created_by = Some(actor.id);
    match storage.generate_report_card(body).await {
        Ok(card) => {
            info!(
                "Report card {} generated: average {} ({})",
                card.id, card.average_score, card.overall_grade
            );
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(AuditAction::Create, card_target(card.id), card_repr(&card))
                    .with_details(json!({
                        "average_score": card.average_score.to_string(),
                        "overall_grade": card.overall_grade,
                    })),
            )
            .await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                card,
                "Report card generated successfully",
            )))
        }
        Err(e) => Ok(storage_error("Report card generation failed", e)),
    }
}

pub async fn get_report_card(
    service: &AssessmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let detail = match storage.get_report_card_detail(id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => return Ok(not_found(ErrorCode::ReportCardNotFound, "Report card not found")),
        Err(e) => return Ok(storage_error("Failed to get report card", e)),
    };
    // 未发布的成绩单对学生与家长不可见
    if policy::is_owner_scoped(&user) && !detail.report_card.is_published {
        return Ok(not_found(ErrorCode::ReportCardNotFound, "Report card not found"));
    }
    if let Err(resp) = ensure_student_visible(&storage, &user, detail.report_card.student_id).await
    {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        detail,
        "Report card retrieved successfully",
    )))
}

pub async fn list_report_cards(
    service: &AssessmentService,
    mut query: ReportCardListQuery,
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
    if policy::is_owner_scoped(&user) {
        query.is_published = Some(true);
    }

    match storage.list_report_cards_with_pagination(query).await {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            resp,
            "Report card list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error("Failed to list report cards", e)),
    }
}

pub async fn update_report_card(
    service: &AssessmentService,
    id: i64,
    body: UpdateReportCardRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.update_report_card(id, body).await {
        Ok(Some(card)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(AuditAction::Update, card_target(card.id), card_repr(&card)),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                card,
                "Report card updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ReportCardNotFound, "Report card not found")),
        Err(e) => Ok(storage_error("Failed to update report card", e)),
    }
}

pub async fn set_published(
    service: &AssessmentService,
    id: i64,
    published: bool,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.set_report_card_published(id, published).await {
        Ok(Some(card)) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(AuditAction::Update, card_target(card.id), card_repr(&card))
                    .with_details(json!({ "is_published": published })),
            )
            .await;
            let message = if published {
                "Report card published"
            } else {
                "Report card unpublished"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(card, message)))
        }
        Ok(None) => Ok(not_found(ErrorCode::ReportCardNotFound, "Report card not found")),
        Err(e) => Ok(storage_error("Failed to change report card visibility", e)),
    }
}

pub async fn delete_report_card(
    service: &AssessmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let actor = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.delete_report_card(id).await {
        Ok(true) => {
            activity::record(
                &storage,
                request,
                &actor,
                Activity::new(
                    AuditAction::Delete,
                    card_target(id),
                    format!("Report card #{id}"),
                ),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Report card deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ReportCardNotFound, "Report card not found")),
        Err(e) => Ok(storage_error("Failed to delete report card", e)),
    }
}
