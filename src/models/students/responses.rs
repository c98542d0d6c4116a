use serde::Serialize;
use ts_rs::TS;

use super::entities::{ParentGuardian, Student};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListResponse {
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ParentListResponse {
    pub items: Vec<ParentGuardian>,
    pub pagination: PaginationInfo,
}

// 创建家长时可能同时生成的账号凭据（仅返回一次）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct GeneratedAccount {
    pub user_id: i64,
    pub username: String,
    pub initial_password: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ParentCreatedResponse {
    pub parent: ParentGuardian,
    pub generated_account: Option<GeneratedAccount>,
}
