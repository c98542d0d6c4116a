use serde::Serialize;
use ts_rs::TS;

use super::entities::SchoolConfiguration;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SystemInfoResponse {
    pub system_name: String,
    pub school: SchoolConfiguration,
    pub environment: String,
    pub log_level: String,
    pub fee_grace_days: i64,
}
