use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AttendanceStatus;
use crate::models::common::pagination::deserialize_optional_i64;
use crate::models::common::{ClassLevel, PaginationQuery};

// 单个学生的出勤标记
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

// 按年级批量记录出勤（按 学生+日期+周期 覆盖写入）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct RecordAttendanceRequest {
    pub class_level: ClassLevel,
    pub date: NaiveDate,
    pub term_id: i64,
    pub period_id: Option<i64>,
    pub records: Vec<AttendanceMark>,
    #[serde(skip)]
    #[ts(skip)]
    pub recorded_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub period_id: Option<i64>,
    /// 置为 true 时解除记录与考勤周期的关联
    #[serde(default)]
    pub clear_period: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub period_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub class_level: Option<ClassLevel>,
    pub status: Option<AttendanceStatus>,
    #[serde(skip)]
    #[ts(skip)]
    pub student_ids: Option<Vec<i64>>,
}

// 重新计算汇总：指定学生，或指定年级的全部在读学生
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct RecomputeSummaryRequest {
    pub term_id: i64,
    pub period_id: Option<i64>,
    pub student_id: Option<i64>,
    pub class_level: Option<ClassLevel>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct SummaryListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub period_id: Option<i64>,
    #[serde(skip)]
    #[ts(skip)]
    pub student_ids: Option<Vec<i64>>,
}
