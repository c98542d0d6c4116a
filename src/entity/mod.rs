//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

// 账号与权限
pub mod group_permissions;
pub mod groups;
pub mod permissions;
pub mod user_groups;
pub mod user_permissions;
pub mod users;

// 人员
pub mod parent_guardians;
pub mod students;
pub mod teacher_subjects;
pub mod teachers;

// 教学结构
pub mod academic_terms;
pub mod attendance_periods;
pub mod class_assignments;
pub mod subjects;

// 业务记录
pub mod assignments;
pub mod attendance_summaries;
pub mod fee_categories;
pub mod fee_payments;
pub mod fees;
pub mod grades;
pub mod report_cards;
pub mod student_assignments;
pub mod student_attendances;

// 通知与日志
pub mod admin_action_logs;
pub mod audit_logs;
pub mod notifications;
pub mod school_configuration;

use chrono::{DateTime, Utc};

/// 秒级时间戳转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
