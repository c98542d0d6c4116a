use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::academics::requests::{
    ClassAssignmentListQuery, CreateClassAssignmentRequest, CreatePeriodRequest,
    CreateSubjectRequest, CreateTermRequest, PeriodListQuery, SubjectListQuery, TermListQuery,
    UpdateClassAssignmentRequest, UpdatePeriodRequest, UpdateSubjectRequest, UpdateTermRequest,
};
use crate::policy::Resource;
use crate::services::AcademicService;
use crate::utils::SafeIDI64;

static ACADEMIC_SERVICE: Lazy<AcademicService> = Lazy::new(AcademicService::new_lazy);

// 科目
pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectListQuery>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.list_subjects(query.into_inner(), &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.create_subject(body.into_inner(), &req).await
}

pub async fn get_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.get_subject(id.0, &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .update_subject(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.delete_subject(id.0, &req).await
}

// 任课安排
pub async fn list_class_assignments(
    req: HttpRequest,
    query: web::Query<ClassAssignmentListQuery>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .list_class_assignments(query.into_inner(), &req)
        .await
}

pub async fn create_class_assignment(
    req: HttpRequest,
    body: web::Json<CreateClassAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .create_class_assignment(body.into_inner(), &req)
        .await
}

pub async fn get_class_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.get_class_assignment(id.0, &req).await
}

pub async fn update_class_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateClassAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .update_class_assignment(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_class_assignment(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.delete_class_assignment(id.0, &req).await
}

// 学期
pub async fn list_terms(
    req: HttpRequest,
    query: web::Query<TermListQuery>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.list_terms(query.into_inner(), &req).await
}

pub async fn create_term(
    req: HttpRequest,
    body: web::Json<CreateTermRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.create_term(body.into_inner(), &req).await
}

pub async fn get_active_term(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.get_active_term(&req).await
}

pub async fn get_term(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.get_term(id.0, &req).await
}

pub async fn update_term(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTermRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .update_term(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_term(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.delete_term(id.0, &req).await
}

// 考勤周期
pub async fn list_periods(
    req: HttpRequest,
    query: web::Query<PeriodListQuery>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.list_periods(query.into_inner(), &req).await
}

pub async fn create_period(
    req: HttpRequest,
    body: web::Json<CreatePeriodRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.create_period(body.into_inner(), &req).await
}

pub async fn get_period(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.get_period(id.0, &req).await
}

pub async fn update_period(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdatePeriodRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .update_period(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_period(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.delete_period(id.0, &req).await
}

// 配置路由
pub fn configure_academic_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subjects")
            .wrap(RequirePermission::by_method(Resource::Subject))
            .wrap(RequireJWT)
            .route("", web::get().to(list_subjects))
            .route("", web::post().to(create_subject))
            .route("/{id}", web::get().to(get_subject))
            .route("/{id}", web::put().to(update_subject))
            .route("/{id}", web::delete().to(delete_subject)),
    );
    cfg.service(
        web::scope("/api/v1/class-assignments")
            .wrap(RequirePermission::by_method(Resource::ClassAssignment))
            .wrap(RequireJWT)
            .route("", web::get().to(list_class_assignments))
            .route("", web::post().to(create_class_assignment))
            .route("/{id}", web::get().to(get_class_assignment))
            .route("/{id}", web::put().to(update_class_assignment))
            .route("/{id}", web::delete().to(delete_class_assignment)),
    );
    cfg.service(
        web::scope("/api/v1/terms")
            .wrap(RequirePermission::by_method(Resource::AcademicTerm))
            .wrap(RequireJWT)
            .route("", web::get().to(list_terms))
            .route("", web::post().to(create_term))
            // 固定路径需先于 /{id} 注册
            .route("/active", web::get().to(get_active_term))
            .route("/{id}", web::get().to(get_term))
            .route("/{id}", web::put().to(update_term))
            .route("/{id}", web::delete().to(delete_term)),
    );
    cfg.service(
        web::scope("/api/v1/periods")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::AttendancePeriod))
                    .route(web::get().to(list_periods))
                    .route(web::post().to(create_period)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::AttendancePeriod))
                    .route(web::get().to(get_period))
                    .route(web::put().to(update_period))
                    .route(web::delete().to(delete_period)),
            ),
    );
}
