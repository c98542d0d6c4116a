//! 带类型标签的实体引用
//!
//! 通知、审计日志等记录通过 (`target_kind`, `target_id`) 两列指向任意业务实体。
//! 写入前由存储层按 kind 对应的表校验 id 是否存在。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "common.ts")]
    pub enum TargetKind("目标类型") {
        Account => "account",
        Group => "group",
        Student => "student",
        ParentGuardian => "parent_guardian",
        Teacher => "teacher",
        Subject => "subject",
        ClassAssignment => "class_assignment",
        AcademicTerm => "academic_term",
        AttendancePeriod => "attendance_period",
        StudentAttendance => "student_attendance",
        AttendanceSummary => "attendance_summary",
        FeeCategory => "fee_category",
        Fee => "fee",
        FeePayment => "fee_payment",
        Assignment => "assignment",
        StudentAssignment => "student_assignment",
        Grade => "grade",
        ReportCard => "report_card",
        Notification => "notification",
        SchoolConfiguration => "school_configuration",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "common.ts")]
pub struct TargetRef {
    pub kind: TargetKind,
    pub id: i64,
}

impl TargetRef {
    pub fn new(kind: TargetKind, id: i64) -> Self {
        Self { kind, id }
    }

    /// 从数据库两列还原；任一列缺失或 kind 无法识别时返回 None
    pub fn from_columns(kind: Option<&str>, id: Option<i64>) -> Option<Self> {
        match (kind, id) {
            (Some(kind), Some(id)) => kind.parse().ok().map(|kind| Self { kind, id }),
            _ => None,
        }
    }

    pub fn into_columns(target: Option<Self>) -> (Option<String>, Option<i64>) {
        match target {
            Some(t) => (Some(t.kind.as_str().to_string()), Some(t.id)),
            None => (None, None),
        }
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_columns() {
        let target = TargetRef::new(TargetKind::Fee, 42);
        let (kind, id) = TargetRef::into_columns(Some(target));
        assert_eq!(kind.as_deref(), Some("fee"));
        assert_eq!(
            TargetRef::from_columns(kind.as_deref(), id),
            Some(target)
        );
        assert_eq!(TargetRef::from_columns(Some("fee"), None), None);
        assert_eq!(TargetRef::from_columns(Some("homework"), Some(1)), None);
    }

    #[test]
    fn test_unknown_kind_rejected_on_deserialize() {
        let ok: TargetRef = serde_json::from_str(r#"{"kind":"grade","id":3}"#).unwrap();
        assert_eq!(ok, TargetRef::new(TargetKind::Grade, 3));
        assert!(serde_json::from_str::<TargetRef>(r#"{"kind":"homework","id":3}"#).is_err());
    }
}
