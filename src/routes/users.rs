use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::users::requests::{
    CreateUserRequest, SetUserGroupsRequest, UpdateUserRequest, UserListParams,
    UserPermissionsRequest,
};
use crate::policy::{Action, Resource};
use crate::services::UserService;
use crate::utils::SafeIDI64;

// 懒加载的全局 UserService 实例
static USER_SERVICE: Lazy<UserService> = Lazy::new(UserService::new_lazy);

// HTTP处理程序
pub async fn list_users(
    req: HttpRequest,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.list_users(query.into_inner(), &req).await
}

pub async fn create_user(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.create_user(user_data.into_inner(), &req).await
}

pub async fn get_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user(user_id.0, &req).await
}

pub async fn update_user(
    req: HttpRequest,
    user_id: SafeIDI64,
    update_data: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .update_user(user_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_user(req: HttpRequest, user_id: SafeIDI64) -> ActixResult<HttpResponse> {
    USER_SERVICE.delete_user(user_id.0, &req).await
}

pub async fn set_user_groups(
    req: HttpRequest,
    user_id: SafeIDI64,
    body: web::Json<SetUserGroupsRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .set_user_groups(user_id.0, body.into_inner(), &req)
        .await
}

pub async fn get_user_permissions(
    req: HttpRequest,
    user_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    USER_SERVICE.get_user_permissions(user_id.0, &req).await
}

pub async fn grant_user_permissions(
    req: HttpRequest,
    user_id: SafeIDI64,
    body: web::Json<UserPermissionsRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .grant_user_permissions(user_id.0, body.into_inner(), &req)
        .await
}

pub async fn revoke_user_permissions(
    req: HttpRequest,
    user_id: SafeIDI64,
    body: web::Json<UserPermissionsRequest>,
) -> ActixResult<HttpResponse> {
    USER_SERVICE
        .revoke_user_permissions(user_id.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::Account))
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::Account))
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            )
            .service(
                web::resource("/{id}/groups")
                    .wrap(RequirePermission::new(Resource::Account, Action::Change))
                    .route(web::put().to(set_user_groups)),
            )
            .service(
                web::resource("/{id}/permissions")
                    .wrap(RequirePermission::by_method(Resource::Permission))
                    .route(web::get().to(get_user_permissions))
                    .route(web::post().to(grant_user_permissions))
                    .route(web::delete().to(revoke_user_permissions)),
            ),
    );
}
