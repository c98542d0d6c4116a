use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::PeriodType;
use crate::models::common::pagination::{deserialize_optional_bool, deserialize_optional_i64};
use crate::models::common::{ClassLevel, PaginationQuery};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct SubjectListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct CreateClassAssignmentRequest {
    pub class_level: ClassLevel,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub academic_year: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct UpdateClassAssignmentRequest {
    pub class_level: Option<ClassLevel>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct ClassAssignmentListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_level: Option<ClassLevel>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub teacher_id: Option<i64>,
    pub academic_year: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct CreateTermRequest {
    pub term: i16,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct UpdateTermRequest {
    pub term: Option<i16>,
    pub academic_year: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct TermListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct CreatePeriodRequest {
    pub period_type: PeriodType,
    pub term_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_locked: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct UpdatePeriodRequest {
    pub period_type: Option<PeriodType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_locked: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct PeriodListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term_id: Option<i64>,
    pub period_type: Option<PeriodType>,
}

/// `load-periods` 查询参数；term_id 必填
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct LoadPeriodsQuery {
    pub term_id: i64,
}
