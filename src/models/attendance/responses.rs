use serde::Serialize;
use ts_rs::TS;

use super::entities::{AttendanceSummary, StudentAttendance};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceListResponse {
    pub items: Vec<StudentAttendance>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct SummaryListResponse {
    pub items: Vec<AttendanceSummary>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct RecordAttendanceResponse {
    pub records: Vec<StudentAttendance>,
    pub summaries_updated: usize,
}
