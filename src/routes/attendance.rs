use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequirePermission};
use crate::models::academics::requests::LoadPeriodsQuery;
use crate::models::attendance::requests::{
    AttendanceListQuery, RecomputeSummaryRequest, RecordAttendanceRequest, SummaryListQuery,
    UpdateAttendanceRequest,
};
use crate::policy::{Action, Resource};
use crate::services::{AcademicService, AttendanceService};
use crate::utils::SafeIDI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);
static ACADEMIC_SERVICE: Lazy<AcademicService> = Lazy::new(AcademicService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(query.into_inner(), &req)
        .await
}

pub async fn record_attendance(
    req: HttpRequest,
    body: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_attendance(body.into_inner(), &req)
        .await
}

pub async fn get_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_attendance(id.0, &req).await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_attendance(id.0, &req).await
}

/// 考勤表单的周期下拉数据
pub async fn load_periods(
    req: HttpRequest,
    query: web::Query<LoadPeriodsQuery>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.load_periods(query.term_id, &req).await
}

pub async fn list_summaries(
    req: HttpRequest,
    query: web::Query<SummaryListQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_summaries(query.into_inner(), &req)
        .await
}

pub async fn recompute_summaries(
    req: HttpRequest,
    body: web::Json<RecomputeSummaryRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .recompute_summaries(body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::Attendance))
                    .route(web::get().to(list_attendance))
                    .route(
                        web::post()
                            .to(record_attendance)
                            .wrap(RateLimit::bulk_write()),
                    ),
            )
            .service(
                web::resource("/load-periods/")
                    .wrap(RequirePermission::new(Resource::AttendancePeriod, Action::View))
                    .route(web::get().to(load_periods)),
            )
            .service(
                web::resource("/summaries")
                    .wrap(RequirePermission::new(Resource::AttendanceSummary, Action::View))
                    .route(web::get().to(list_summaries)),
            )
            .service(
                web::resource("/summaries/recompute")
                    .wrap(RateLimit::bulk_write())
                    .wrap(RequirePermission::new(Resource::AttendanceSummary, Action::Add))
                    .route(web::post().to(recompute_summaries)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::Attendance))
                    .route(web::get().to(get_attendance))
                    .route(web::put().to(update_attendance))
                    .route(web::delete().to(delete_attendance)),
            ),
    );
}
