use serde::Serialize;
use ts_rs::TS;

use super::entities::Teacher;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherListResponse {
    pub items: Vec<Teacher>,
    pub pagination: PaginationInfo,
}
