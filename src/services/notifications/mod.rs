pub mod dispatch;
pub mod inbox;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::notifications::requests::{CreateNotificationRequest, NotificationListQuery};

super::lazy_storage_service!(NotificationService);

impl NotificationService {
    // 当前账号的通知
    pub async fn list_notifications(
        &self,
        query: NotificationListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        inbox::list_notifications(self, query, request).await
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        inbox::unread_count(self, request).await
    }

    pub async fn mark_read(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        inbox::mark_read(self, id, request).await
    }

    pub async fn mark_all_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        inbox::mark_all_read(self, request).await
    }

    pub async fn delete_notification(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        inbox::delete_notification(self, id, request).await
    }

    /// 教职工向指定账号发送通知
    pub async fn create_notification(
        &self,
        body: CreateNotificationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        dispatch::create_notification(self, body, request).await
    }
}
