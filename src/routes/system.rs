use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::system::requests::UpdateSchoolConfigurationRequest;
use crate::policy::Resource;
use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn get_info(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_info(&request).await
}

pub async fn get_configuration(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_configuration(&request).await
}

pub async fn update_configuration(
    request: HttpRequest,
    body: web::Json<UpdateSchoolConfigurationRequest>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .update_configuration(body.into_inner(), &request)
        .await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .wrap(middleware::Compress::default())
            .route("/info", web::get().to(get_info))
            .service(
                web::resource("/configuration")
                    .wrap(RequirePermission::by_method(Resource::SchoolConfiguration))
                    .wrap(RequireJWT)
                    .route(web::get().to(get_configuration))
                    .route(web::put().to(update_configuration)),
            ),
    );
}
