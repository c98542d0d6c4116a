use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::groups::requests::{
    GroupListQuery, GroupRequest, PermissionListQuery, SetGroupPermissionsRequest,
};
use crate::policy::{Action, Resource};
use crate::services::GroupService;
use crate::utils::SafeIDI64;

static GROUP_SERVICE: Lazy<GroupService> = Lazy::new(GroupService::new_lazy);

pub async fn list_groups(
    req: HttpRequest,
    query: web::Query<GroupListQuery>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_groups(query.into_inner(), &req).await
}

pub async fn create_group(
    req: HttpRequest,
    body: web::Json<GroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.create_group(body.into_inner(), &req).await
}

pub async fn get_group(req: HttpRequest, group_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.get_group(group_id.0, &req).await
}

pub async fn rename_group(
    req: HttpRequest,
    group_id: SafeIDI64,
    body: web::Json<GroupRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .rename_group(group_id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_group(req: HttpRequest, group_id: SafeIDI64) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.delete_group(group_id.0, &req).await
}

pub async fn set_group_permissions(
    req: HttpRequest,
    group_id: SafeIDI64,
    body: web::Json<SetGroupPermissionsRequest>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE
        .set_group_permissions(group_id.0, body.into_inner(), &req)
        .await
}

pub async fn list_permissions(
    req: HttpRequest,
    query: web::Query<PermissionListQuery>,
) -> ActixResult<HttpResponse> {
    GROUP_SERVICE.list_permissions(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_group_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/groups")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::Group))
                    .route(web::get().to(list_groups))
                    .route(web::post().to(create_group)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::Group))
                    .route(web::get().to(get_group))
                    .route(web::put().to(rename_group))
                    .route(web::delete().to(delete_group)),
            )
            .service(
                web::resource("/{id}/permissions")
                    .wrap(RequirePermission::new(Resource::Group, Action::Change))
                    .route(web::put().to(set_group_permissions)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/permissions")
            .wrap(RequirePermission::new(Resource::Permission, Action::View))
            .wrap(RequireJWT)
            .route("", web::get().to(list_permissions)),
    );
}
