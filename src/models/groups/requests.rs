use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct GroupRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct SetGroupPermissionsRequest {
    pub permission_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct GroupListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct PermissionListQuery {
    pub content_type: Option<String>,
}
