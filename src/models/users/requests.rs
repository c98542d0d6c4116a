use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_bool;

// 账号查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

// 账号创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: UserRole,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(skip)]
    #[ts(skip)]
    pub is_superuser: bool,
}

// 账号更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: Option<UserRole>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
}

// 账号列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

// 设置账号所属用户组
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct SetUserGroupsRequest {
    pub group_ids: Vec<i64>,
}

// 直接授予/撤销权限
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserPermissionsRequest {
    pub permission_ids: Vec<i64>,
}
