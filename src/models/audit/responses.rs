use serde::Serialize;
use ts_rs::TS;

use super::entities::{AdminActionLog, AuditLog};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "audit.ts")]
pub struct AuditLogListResponse {
    pub items: Vec<AuditLog>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "audit.ts")]
pub struct AdminLogListResponse {
    pub items: Vec<AdminActionLog>,
    pub pagination: PaginationInfo,
}
