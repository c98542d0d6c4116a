use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AssignmentType, SubmissionStatus};
use crate::models::common::pagination::{deserialize_optional_bool, deserialize_optional_i64};
use crate::models::common::PaginationQuery;

fn default_max_score() -> i32 {
    100
}

fn default_weight() -> i32 {
    10
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assignment_type: AssignmentType,
    pub class_assignment_id: i64,
    pub due_date: NaiveDate,
    #[serde(default = "default_max_score")]
    pub max_score: i32,
    #[serde(default = "default_weight")]
    pub weight: i32,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignment_type: Option<AssignmentType>,
    pub due_date: Option<NaiveDate>,
    pub max_score: Option<i32>,
    pub weight: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssignmentListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub class_assignment_id: Option<i64>,
    pub assignment_type: Option<AssignmentType>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct StudentAssignmentListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
    #[serde(skip)]
    #[ts(skip)]
    pub assignment_id: Option<i64>,
    #[serde(skip)]
    #[ts(skip)]
    pub student_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct SubmitAssignmentRequest {
    pub submitted_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct GradeSubmissionRequest {
    #[ts(type = "string")]
    pub score: Decimal,
    pub feedback: Option<String>,
}

// 成绩录入；总分与 GES 等级由服务端计算
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub class_assignment_id: Option<i64>,
    pub academic_year: String,
    pub term: i16,
    #[serde(default)]
    #[ts(type = "string")]
    pub classwork_score: Decimal,
    #[serde(default)]
    #[ts(type = "string")]
    pub homework_score: Decimal,
    #[serde(default)]
    #[ts(type = "string")]
    pub test_score: Decimal,
    #[serde(default)]
    #[ts(type = "string")]
    pub exam_score: Decimal,
    pub remarks: Option<String>,
    #[serde(skip)]
    #[ts(skip)]
    pub recorded_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct UpdateGradeRequest {
    #[ts(type = "string | null")]
    pub classwork_score: Option<Decimal>,
    #[ts(type = "string | null")]
    pub homework_score: Option<Decimal>,
    #[ts(type = "string | null")]
    pub test_score: Option<Decimal>,
    #[ts(type = "string | null")]
    pub exam_score: Option<Decimal>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct GradeListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub subject_id: Option<i64>,
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term: Option<i64>,
    #[serde(skip)]
    #[ts(skip)]
    pub student_ids: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct GenerateReportCardRequest {
    pub student_id: i64,
    pub academic_year: String,
    pub term: i16,
    pub teacher_remarks: Option<String>,
    pub principal_remarks: Option<String>,
    #[serde(skip)]
    #[ts(skip)]
    pub created_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct UpdateReportCardRequest {
    pub teacher_remarks: Option<String>,
    pub principal_remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct ReportCardListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_published: Option<bool>,
    #[serde(skip)]
    #[ts(skip)]
    pub student_ids: Option<Vec<i64>>,
}
