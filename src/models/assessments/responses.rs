use serde::Serialize;
use ts_rs::TS;

use super::entities::{Assignment, Grade, ReportCard, StudentAssignment};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssignmentListResponse {
    pub items: Vec<Assignment>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssignmentCreatedResponse {
    pub assignment: Assignment,
    pub student_assignments_created: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct StudentAssignmentListResponse {
    pub items: Vec<StudentAssignment>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct GradeListResponse {
    pub items: Vec<Grade>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct ReportCardListResponse {
    pub items: Vec<ReportCard>,
    pub pagination: PaginationInfo,
}

/// 成绩单及其所依据的成绩
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct ReportCardDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub report_card: ReportCard,
    pub grades: Vec<Grade>,
}
