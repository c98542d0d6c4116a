use serde::Serialize;
use ts_rs::TS;

use super::entities::{Group, Permission};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct GroupListResponse {
    pub items: Vec<Group>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct PermissionListResponse {
    pub items: Vec<Permission>,
}
