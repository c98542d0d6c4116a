use serde::Deserialize;
use ts_rs::TS;

use super::entities::GradingSystem;

/// 更新学校配置请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct UpdateSchoolConfigurationRequest {
    pub school_name: Option<String>,
    pub grading_system: Option<GradingSystem>,
    pub is_locked: Option<bool>,
}
