use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequirePermission};
use crate::models::notifications::requests::{CreateNotificationRequest, NotificationListQuery};
use crate::policy::{Action, Resource};
use crate::services::NotificationService;
use crate::utils::SafeIDI64;

static NOTIFICATION_SERVICE: Lazy<NotificationService> =
    Lazy::new(NotificationService::new_lazy);

pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListQuery>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(query.into_inner(), &req)
        .await
}

pub async fn create_notification(
    req: HttpRequest,
    body: web::Json<CreateNotificationRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .create_notification(body.into_inner(), &req)
        .await
}

pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.unread_count(&req).await
}

pub async fn mark_all_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_all_read(&req).await
}

pub async fn mark_read(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_read(id.0, &req).await
}

pub async fn delete_notification(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.delete_notification(id.0, &req).await
}

// 配置路由
pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(RequireJWT)
            .service(
                web::resource("")
                    .wrap(RequirePermission::by_method(Resource::Notification))
                    .route(web::get().to(list_notifications))
                    .route(web::post().to(create_notification)),
            )
            .service(
                web::resource("/unread-count")
                    .wrap(RequirePermission::new(Resource::Notification, Action::View))
                    .route(web::get().to(unread_count)),
            )
            .service(
                web::resource("/read-all")
                    .wrap(RequirePermission::new(Resource::Notification, Action::Change))
                    .route(web::post().to(mark_all_read)),
            )
            .service(
                web::resource("/{id}/read")
                    .wrap(RequirePermission::new(Resource::Notification, Action::Change))
                    .route(web::post().to(mark_read)),
            )
            .service(
                web::resource("/{id}")
                    .wrap(RequirePermission::by_method(Resource::Notification))
                    .route(web::delete().to(delete_notification)),
            ),
    );
}
