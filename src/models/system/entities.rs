use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "system.ts")]
    pub enum GradingSystem("评分体系") {
        Ges => "GES",
        Wassce => "WASSCE",
    }
}

/// 学校配置（单行）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "system.ts")]
pub struct SchoolConfiguration {
    pub school_name: String,
    pub grading_system: GradingSystem,
    pub is_locked: bool,
    pub updated_by: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl SchoolConfiguration {
    /// 锁定后不允许修改评分体系
    pub fn check_update(&self, grading_system: Option<GradingSystem>) -> Result<(), String> {
        match grading_system {
            Some(gs) if self.is_locked && gs != self.grading_system => {
                Err("Grading system is locked and cannot be changed".to_string())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_configuration() {
        let mut config = SchoolConfiguration {
            school_name: "Test School".to_string(),
            grading_system: GradingSystem::Ges,
            is_locked: false,
            updated_by: None,
            updated_at: Utc::now(),
        };
        assert!(config.check_update(Some(GradingSystem::Wassce)).is_ok());
        config.is_locked = true;
        assert!(config.check_update(Some(GradingSystem::Wassce)).is_err());
        assert!(config.check_update(Some(GradingSystem::Ges)).is_ok());
        assert!(config.check_update(None).is_ok());
    }
}
