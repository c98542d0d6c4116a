use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::assessments::requests::{
    AssignmentListQuery, CreateAssignmentRequest, CreateGradeRequest, GenerateReportCardRequest,
    GradeListQuery, GradeSubmissionRequest, ReportCardListQuery, StudentAssignmentListQuery,
    SubmitAssignmentRequest, UpdateAssignmentRequest, UpdateGradeRequest,
    UpdateReportCardRequest,
};
use crate::policy::{Action, Resource};
use crate::services::AssessmentService;
use crate::utils::{SafeAssignmentIdI64, SafeIDI64};

static ASSESSMENT_SERVICE: Lazy<AssessmentService> = Lazy::new(AssessmentService::new_lazy);

// 作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_assignments(query.into_inner(), &req)
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .create_assignment(body.into_inner(), &req)
        .await
}

pub async fn get_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_assignment(id.0, &req).await
}

pub async fn update_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_assignment(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_assignment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.delete_assignment(id.0, &req).await
}

pub async fn list_submissions(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    query: web::Query<StudentAssignmentListQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_submissions(assignment_id.0, query.into_inner(), &req)
        .await
}

// 学生作业
pub async fn get_submission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_submission(id.0, &req).await
}

pub async fn submit_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .submit_assignment(id.0, body.into_inner(), &req)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .grade_submission(id.0, body.into_inner(), &req)
        .await
}

// 成绩
pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeListQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.list_grades(query.into_inner(), &req).await
}

pub async fn create_grade(
    req: HttpRequest,
    body: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.create_grade(body.into_inner(), &req).await
}

pub async fn get_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_grade(id.0, &req).await
}

pub async fn update_grade(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_grade(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.delete_grade(id.0, &req).await
}

// 成绩单
pub async fn list_report_cards(
    req: HttpRequest,
    query: web::Query<ReportCardListQuery>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .list_report_cards(query.into_inner(), &req)
        .await
}

pub async fn generate_report_card(
    req: HttpRequest,
    body: web::Json<GenerateReportCardRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .generate_report_card(body.into_inner(), &req)
        .await
}

pub async fn get_report_card(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.get_report_card(id.0, &req).await
}

pub async fn update_report_card(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateReportCardRequest>,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .update_report_card(id.0, body.into_inner(), &req)
        .await
}

pub async fn publish_report_card(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .set_report_card_published(id.0, true, &req)
        .await
}

pub async fn unpublish_report_card(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE
        .set_report_card_published(id.0, false, &req)
        .await
}

pub async fn delete_report_card(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSESSMENT_SERVICE.delete_report_card(id.0, &req).await
}

// 配置路由
pub fn configure_assessment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::Assignment))
                    .route(web::get().to(list_assignments))
                    .route(web::post().to(create_assignment)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::Assignment))
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(delete_assignment)),
            )
            .service(
                web::resource("/{assignment_id}/submissions")
                    .wrap(RequirePermission::new(Resource::StudentAssignment, Action::View))
                    .route(web::get().to(list_submissions)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(RequireJWT)
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::new(Resource::StudentAssignment, Action::View))
                    .route(web::get().to(get_submission)),
            )
            .service(
                web::resource("/{id}/submit")
                    .wrap(RequirePermission::new(Resource::StudentAssignment, Action::Change))
                    .route(web::post().to(submit_assignment)),
            )
            .service(
                // 批改会写入成绩，学生不可调用
                web::resource("/{id}/grade")
                    .wrap(RequirePermission::new(Resource::Grade, Action::Add))
                    .route(web::post().to(grade_submission)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(RequirePermission::by_method(Resource::Grade))
            .wrap(RequireJWT)
            .route("", web::get().to(list_grades))
            .route("", web::post().to(create_grade))
            .route("/{id}", web::get().to(get_grade))
            .route("/{id}", web::put().to(update_grade))
            .route("/{id}", web::delete().to(delete_grade)),
    );
    cfg.service(
        web::scope("/api/v1/report-cards")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::ReportCard))
                    .route(web::get().to(list_report_cards))
                    .route(web::post().to(generate_report_card)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::ReportCard))
                    .route(web::get().to(get_report_card))
                    .route(web::put().to(update_report_card))
                    .route(web::delete().to(delete_report_card)),
            )
            .service(
                web::resource("/{id}/publish")
                    .wrap(RequirePermission::new(Resource::ReportCard, Action::Change))
                    .route(web::post().to(publish_report_card)),
            )
            .service(
                web::resource("/{id}/unpublish")
                    .wrap(RequirePermission::new(Resource::ReportCard, Action::Change))
                    .route(web::post().to(unpublish_report_card)),
            ),
    );
}
