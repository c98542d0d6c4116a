use serde::Deserialize;
use ts_rs::TS;

use super::entities::AuditAction;
use crate::models::common::pagination::deserialize_optional_i64;
use crate::models::common::{PaginationQuery, TargetKind};

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "audit.ts")]
pub struct AuditLogListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub user_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub target_kind: Option<TargetKind>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub target_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "audit.ts")]
pub struct AdminLogListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub user_id: Option<i64>,
    pub target_kind: Option<TargetKind>,
}
