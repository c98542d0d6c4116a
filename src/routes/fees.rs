use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::fees::requests::{
    CreateFeeCategoryRequest, CreateFeeRequest, FeeCategoryListQuery, FeeListQuery,
    RecordPaymentRequest, UpdateFeeCategoryRequest, UpdateFeeRequest,
};
use crate::policy::Resource;
use crate::services::FeeService;
use crate::utils::{SafeFeeIdI64, SafeIDI64};

static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);

// 收费类别
pub async fn list_categories(
    req: HttpRequest,
    query: web::Query<FeeCategoryListQuery>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_categories(query.into_inner(), &req).await
}

pub async fn create_category(
    req: HttpRequest,
    body: web::Json<CreateFeeCategoryRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_category(body.into_inner(), &req).await
}

pub async fn get_category(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_category(id.0, &req).await
}

pub async fn update_category(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateFeeCategoryRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .update_category(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_category(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.delete_category(id.0, &req).await
}

// 学生费用
pub async fn list_fees(
    req: HttpRequest,
    query: web::Query<FeeListQuery>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_fees(query.into_inner(), &req).await
}

pub async fn create_fee(
    req: HttpRequest,
    body: web::Json<CreateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create_fee(body.into_inner(), &req).await
}

pub async fn get_fee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.get_fee(id.0, &req).await
}

pub async fn update_fee(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.update_fee(id.0, body.into_inner(), &req).await
}

pub async fn delete_fee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.delete_fee(id.0, &req).await
}

// 缴费记录
pub async fn list_payments(req: HttpRequest, fee_id: SafeFeeIdI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_payments(fee_id.0, &req).await
}

pub async fn record_payment(
    req: HttpRequest,
    fee_id: SafeFeeIdI64,
    body: web::Json<RecordPaymentRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE
        .record_payment(fee_id.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_fee_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/fee-categories")
            .wrap(RequirePermission::by_method(Resource::FeeCategory))
            .wrap(RequireJWT)
            .route("", web::get().to(list_categories))
            .route("", web::post().to(create_category))
            .route("/{id}", web::get().to(get_category))
            .route("/{id}", web::put().to(update_category))
            .route("/{id}", web::delete().to(delete_category)),
    );
    cfg.service(
        web::scope("/api/v1/fees")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::Fee))
                    .route(web::get().to(list_fees))
                    .route(web::post().to(create_fee)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::Fee))
                    .route(web::get().to(get_fee))
                    .route(web::put().to(update_fee))
                    .route(web::delete().to(delete_fee)),
            )
            .service(
                web::resource("/{fee_id}/payments")
                    .wrap(RequirePermission::by_method(Resource::FeePayment))
                    .route(web::get().to(list_payments))
                    .route(web::post().to(record_payment)),
            ),
    );
}
