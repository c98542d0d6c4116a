pub mod crud;
pub mod permissions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::groups::requests::{
    GroupListQuery, GroupRequest, PermissionListQuery, SetGroupPermissionsRequest,
};

super::lazy_storage_service!(GroupService);

impl GroupService {
    pub async fn create_group(
        &self,
        body: GroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::create_group(self, body, request).await
    }

    pub async fn list_groups(
        &self,
        query: GroupListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::list_groups(self, query, request).await
    }

    pub async fn get_group(&self, group_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        crud::get_group(self, group_id, request).await
    }

    pub async fn rename_group(
        &self,
        group_id: i64,
        body: GroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::rename_group(self, group_id, body, request).await
    }

    pub async fn delete_group(
        &self,
        group_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        crud::delete_group(self, group_id, request).await
    }

    // 替换用户组权限集合
    pub async fn set_group_permissions(
        &self,
        group_id: i64,
        body: SetGroupPermissionsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        permissions::set_group_permissions(self, group_id, body, request).await
    }

    pub async fn list_permissions(
        &self,
        query: PermissionListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        permissions::list_permissions(self, query, request).await
    }
}
