use serde::Serialize;
use ts_rs::TS;

use super::entities::{AcademicTerm, AttendancePeriod, ClassAssignment, Subject};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct ClassAssignmentListResponse {
    pub items: Vec<ClassAssignment>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct TermListResponse {
    pub items: Vec<AcademicTerm>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct PeriodListResponse {
    pub items: Vec<AttendancePeriod>,
    pub pagination: PaginationInfo,
}

// 选择框选项：某学期下的考勤周期
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct PeriodOption {
    pub id: i64,
    pub label: String,
}

impl From<&AttendancePeriod> for PeriodOption {
    fn from(period: &AttendancePeriod) -> Self {
        Self {
            id: period.id,
            label: format!(
                "{} ({} - {})",
                period.period_type.display_name(),
                period.start_date,
                period.end_date
            ),
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct LoadPeriodsResponse {
    pub term_id: i64,
    pub periods: Vec<PeriodOption>,
}
