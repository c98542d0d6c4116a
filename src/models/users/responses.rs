use serde::Serialize;
use ts_rs::TS;

use super::entities::User;
use crate::models::common::PaginationInfo;
use crate::models::groups::entities::{Group, Permission};

// 账号响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserResponse {
    pub user: User,
}

// 账号列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}

// 账号有效权限（直接授予 + 用户组继承）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct UserPermissionsResponse {
    pub user_id: i64,
    pub groups: Vec<Group>,
    pub direct: Vec<Permission>,
    pub effective: Vec<String>,
}
