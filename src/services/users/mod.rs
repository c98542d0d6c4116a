pub mod access;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::requests::{
    CreateUserRequest, SetUserGroupsRequest, UpdateUserRequest, UserListParams,
    UserPermissionsRequest,
};

super::lazy_storage_service!(UserService);

impl UserService {
    // 获取账号列表
    pub async fn list_users(
        &self,
        query: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, query, request).await
    }

    // 创建账号
    pub async fn create_user(
        &self,
        user_data: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, user_data, request).await
    }

    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_user(self, user_id, request).await
    }

    // 部分更新账号
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }

    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_user(self, user_id, request).await
    }

    // 替换账号所属用户组
    pub async fn set_user_groups(
        &self,
        user_id: i64,
        body: SetUserGroupsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        access::set_user_groups(self, user_id, body, request).await
    }

    // 账号的用户组、直接权限与有效权限
    pub async fn get_user_permissions(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        access::get_user_permissions(self, user_id, request).await
    }

    pub async fn grant_user_permissions(
        &self,
        user_id: i64,
        body: UserPermissionsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        access::grant_user_permissions(self, user_id, body, request).await
    }

    pub async fn revoke_user_permissions(
        &self,
        user_id: i64,
        body: UserPermissionsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        access::revoke_user_permissions(self, user_id, body, request).await
    }
}
