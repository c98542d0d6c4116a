use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "attendance.ts")]
    pub enum AttendanceStatus("出勤状态") {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
        Sick => "sick",
        Other => "other",
    }
}

impl AttendanceStatus {
    /// 迟到与请假均视为到校；病假和其他不计入
    pub fn counts_as_present(&self) -> bool {
        matches!(
            self,
            AttendanceStatus::Present | AttendanceStatus::Late | AttendanceStatus::Excused
        )
    }
}

string_enum! {
    #[ts(export, export_to = "attendance.ts")]
    pub enum AttendanceRating("出勤评级") {
        Excellent => "excellent",
        Good => "good",
        Fair => "fair",
        Poor => "poor",
    }
}

/// GES 要求的最低到校率
pub const GES_MIN_PRESENT_RATE: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

impl AttendanceRating {
    /// 按到校率分档：90 以上优秀，80 以上良好，70 以上一般
    pub fn from_present_rate(rate: Decimal) -> Self {
        if rate >= Decimal::from(90) {
            AttendanceRating::Excellent
        } else if rate >= GES_MIN_PRESENT_RATE {
            AttendanceRating::Good
        } else if rate >= Decimal::from(70) {
            AttendanceRating::Fair
        } else {
            AttendanceRating::Poor
        }
    }
}

// 学生出勤记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct StudentAttendance {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub period_id: Option<i64>,
    pub term_id: i64,
    pub recorded_by: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 出勤汇总（只能由出勤记录重新计算得到）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "attendance.ts")]
pub struct AttendanceSummary {
    pub id: i64,
    pub student_id: i64,
    pub term_id: i64,
    pub period_id: Option<i64>,
    pub days_present: i32,
    pub days_absent: i32,
    pub days_late: i32,
    pub days_excused: i32,
    pub days_sick: i32,
    pub days_other: i32,
    pub total_days: i32,
    #[ts(type = "string")]
    pub attendance_rate: Decimal,
    #[ts(type = "string")]
    pub present_rate: Decimal,
    pub ges_compliant: bool,
    pub rating: AttendanceRating,
    pub updated_at: DateTime<Utc>,
}

/// 按状态统计的天数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceCounts {
    pub present: i32,
    pub absent: i32,
    pub late: i32,
    pub excused: i32,
    pub sick: i32,
    pub other: i32,
}

impl AttendanceCounts {
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = AttendanceStatus>,
    {
        let mut counts = Self::default();
        for status in statuses {
            match status {
                AttendanceStatus::Present => counts.present += 1,
                AttendanceStatus::Absent => counts.absent += 1,
                AttendanceStatus::Late => counts.late += 1,
                AttendanceStatus::Excused => counts.excused += 1,
                AttendanceStatus::Sick => counts.sick += 1,
                AttendanceStatus::Other => counts.other += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> i32 {
        self.present + self.absent + self.late + self.excused + self.sick + self.other
    }

    /// 出勤率：准时到校天数占比，保留两位小数
    pub fn attendance_rate(&self) -> Decimal {
        percentage(self.present, self.total())
    }

    /// 到校率：准时、迟到、请假合计占比
    pub fn present_rate(&self) -> Decimal {
        percentage(self.present + self.late + self.excused, self.total())
    }

    /// 到校率达到 80% 即满足 GES 要求
    pub fn ges_compliant(&self) -> bool {
        self.present_rate() >= GES_MIN_PRESENT_RATE
    }

    pub fn rating(&self) -> AttendanceRating {
        AttendanceRating::from_present_rate(self.present_rate())
    }
}

fn percentage(part: i32, total: i32) -> Decimal {
    if total <= 0 {
        return Decimal::new(0, 2);
    }
    let mut rate = (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(2);
    rate.rescale(2);
    rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_tally_and_rates() {
        use AttendanceStatus::*;
        let counts = AttendanceCounts::tally([Present, Present, Late, Absent, Excused, Present]);
        assert_eq!(
            counts,
            AttendanceCounts {
                present: 3,
                absent: 1,
                late: 1,
                excused: 1,
                sick: 0,
                other: 0,
            }
        );
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.attendance_rate(), Decimal::from_str("50.00").unwrap());
        assert_eq!(counts.present_rate(), Decimal::from_str("83.33").unwrap());
        assert!(counts.ges_compliant());
        assert_eq!(counts.rating(), AttendanceRating::Good);
    }

    #[test]
    fn test_sick_and_other_count_towards_total_only() {
        use AttendanceStatus::*;
        let counts = AttendanceCounts::tally([Present, Present, Present, Sick, Other]);
        assert_eq!(counts.sick, 1);
        assert_eq!(counts.other, 1);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.present_rate().to_string(), "60.00");
        assert!(!counts.ges_compliant());
        assert_eq!(counts.rating(), AttendanceRating::Poor);
        assert!(!Sick.counts_as_present());
        assert!(Excused.counts_as_present());
        assert_eq!("sick".parse::<AttendanceStatus>().unwrap(), Sick);
        assert_eq!(Other.to_string(), "other");
    }

    #[test]
    fn test_rating_bands_and_ges_threshold() {
        let rate = |s: &str| Decimal::from_str(s).unwrap();
        assert_eq!(AttendanceRating::from_present_rate(rate("90.00")), AttendanceRating::Excellent);
        assert_eq!(AttendanceRating::from_present_rate(rate("89.99")), AttendanceRating::Good);
        assert_eq!(AttendanceRating::from_present_rate(rate("80.00")), AttendanceRating::Good);
        assert_eq!(AttendanceRating::from_present_rate(rate("79.99")), AttendanceRating::Fair);
        assert_eq!(AttendanceRating::from_present_rate(rate("70.00")), AttendanceRating::Fair);
        assert_eq!(AttendanceRating::from_present_rate(rate("69.99")), AttendanceRating::Poor);

        // 4/5 = 80.00 恰好达标
        use AttendanceStatus::*;
        let counts = AttendanceCounts::tally([Present, Late, Excused, Present, Absent]);
        assert_eq!(counts.present_rate().to_string(), "80.00");
        assert!(counts.ges_compliant());
    }

    #[test]
    fn test_empty_counts_have_zero_rate() {
        let counts = AttendanceCounts::tally([]);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.attendance_rate().to_string(), "0.00");
    }
}
