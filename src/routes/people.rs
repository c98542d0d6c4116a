use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::fees::requests::{FeeListQuery, FeeSummaryQuery};
use crate::models::students::requests::{
    CreateParentRequest, CreateStudentRequest, ParentListQuery, StudentListQuery,
    UpdateParentRequest, UpdateStudentRequest,
};
use crate::models::teachers::requests::{
    CreateTeacherRequest, SetTeacherSubjectsRequest, TeacherListQuery, UpdateTeacherRequest,
};
use crate::policy::{Action, Resource};
use crate::services::{FeeService, StudentService, TeacherService};
use crate::utils::{SafeIDI64, SafeStudentIdI64};

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);
static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

// 学生
pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(body.into_inner(), &req).await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(id.0, body.into_inner(), &req)
        .await
}

pub async fn deactivate_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.deactivate_student(id.0, &req).await
}

pub async fn list_student_parents(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<ParentListQuery>,
) -> ActixResult<HttpResponse> {
    let mut query = query.into_inner();
    query.student_id = Some(student_id.0);
    STUDENT_SERVICE.list_parents(query, &req).await
}

pub async fn list_emergency_contacts(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_emergency_contacts(student_id.0, &req)
        .await
}

pub async fn list_student_fees(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<FeeListQuery>,
) -> ActixResult<HttpResponse> {
    let mut query = query.into_inner();
    query.student_id = Some(student_id.0);
    FEE_SERVICE.list_fees(query, &req).await
}

pub async fn student_fee_summary(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<FeeSummaryQuery>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .student_fee_summary(student_id.0, query.into_inner(), &req)
        .await
}

// 家长/监护人
pub async fn list_parents(
    req: HttpRequest,
    query: web::Query<ParentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_parents(query.into_inner(), &req).await
}

pub async fn create_parent(
    req: HttpRequest,
    body: web::Json<CreateParentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_parent(body.into_inner(), &req).await
}

pub async fn get_parent(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_parent(id.0, &req).await
}

pub async fn update_parent(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateParentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_parent(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_parent(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_parent(id.0, &req).await
}

// 教师
pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<TeacherListQuery>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(query.into_inner(), &req).await
}

pub async fn create_teacher(
    req: HttpRequest,
    body: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.create_teacher(body.into_inner(), &req).await
}

pub async fn get_teacher(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(id.0, &req).await
}

pub async fn update_teacher(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(id.0, body.into_inner(), &req)
        .await
}

pub async fn deactivate_teacher(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.deactivate_teacher(id.0, &req).await
}

pub async fn list_teacher_subjects(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teacher_subjects(id.0, &req).await
}

pub async fn set_teacher_subjects(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<SetTeacherSubjectsRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .set_teacher_subjects(id.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_people_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::Student))
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::Student))
                    .route(web::get().to(get_student))
                    .route(web::put().to(update_student))
                    .route(web::delete().to(deactivate_student)),
            )
            .service(
                web::resource("/{student_id}/parents")
                    .wrap(RequirePermission::new(Resource::ParentGuardian, Action::View))
                    .route(web::get().to(list_student_parents)),
            )
            .service(
                web::resource("/{student_id}/emergency-contacts")
                    .wrap(RequirePermission::new(Resource::ParentGuardian, Action::View))
                    .route(web::get().to(list_emergency_contacts)),
            )
            .service(
                web::resource("/{student_id}/fees")
                    .wrap(RequirePermission::new(Resource::Fee, Action::View))
                    .route(web::get().to(list_student_fees)),
            )
            .service(
                web::resource("/{student_id}/fee-summary")
                    .wrap(RequirePermission::new(Resource::Fee, Action::View))
                    .route(web::get().to(student_fee_summary)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/parents")
            .wrap(RequirePermission::by_method(Resource::ParentGuardian))
            .wrap(RequireJWT)
            .route("", web::get().to(list_parents))
            .route("", web::post().to(create_parent))
            .route("/{id}", web::get().to(get_parent))
            .route("/{id}", web::put().to(update_parent))
            .route("/{id}", web::delete().to(delete_parent)),
    );
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::Teacher))
                    .route(web::get().to(list_teachers))
                    .route(web::post().to(create_teacher)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::Teacher))
                    .route(web::get().to(get_teacher))
                    .route(web::put().to(update_teacher))
                    .route(web::delete().to(deactivate_teacher)),
            )
            .service(
                web::resource("/{id}/subjects")
                    .wrap(RequirePermission::by_method(Resource::Teacher))
                    .route(web::get().to(list_teacher_subjects))
                    .route(web::put().to(set_teacher_subjects)),
            ),
    );
}
