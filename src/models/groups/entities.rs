use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 权限
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub content_type: String,
    pub codename: String,
}

// 用户组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct Group {
    pub id: i64,
    pub name: String,
}

// 用户组及其权限
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "group.ts")]
pub struct GroupDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub group: Group,
    pub permissions: Vec<Permission>,
    pub member_count: i64,
}
