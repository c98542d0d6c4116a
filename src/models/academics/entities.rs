use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::ClassLevel;
use crate::string_enum;

/// 学期最长天数
pub const MAX_TERM_DAYS: i64 = 120;

string_enum! {
    #[ts(export, export_to = "academic.ts")]
    pub enum PeriodType("考勤周期类型") {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    }
}

impl PeriodType {
    pub fn display_name(&self) -> &'static str {
        match self {
            PeriodType::Daily => "Daily",
            PeriodType::Weekly => "Weekly",
            PeriodType::Monthly => "Monthly",
        }
    }
}

// 科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 年级-科目-教师 授课安排
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct ClassAssignment {
    pub id: i64,
    pub class_level: ClassLevel,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub academic_year: String,
    pub created_at: DateTime<Utc>,
}

// 学期
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct AcademicTerm {
    pub id: i64,
    pub term: i16,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl AcademicTerm {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

// 考勤周期
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "academic.ts")]
pub struct AttendancePeriod {
    pub id: i64,
    pub period_type: PeriodType,
    pub term_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
}

impl AttendancePeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

/// 学期字段校验：学期号 1-3，起止日期有序且不超过最长天数
pub fn validate_term(term: i16, start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    if !(1..=3).contains(&term) {
        return Err("Term must be 1, 2 or 3".to_string());
    }
    if start > end {
        return Err("Term start date must not be after its end date".to_string());
    }
    if (end - start).num_days() > MAX_TERM_DAYS {
        return Err(format!("A term cannot span more than {MAX_TERM_DAYS} days"));
    }
    Ok(())
}

/// 考勤周期必须落在学期内
pub fn validate_period_dates(
    term: &AcademicTerm,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), String> {
    if start > end {
        return Err("Period start date must not be after its end date".to_string());
    }
    if !term.contains(start) || !term.contains(end) {
        return Err(format!(
            "Period must fall within the term ({} - {})",
            term.start_date, term.end_date
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn term() -> AcademicTerm {
        AcademicTerm {
            id: 1,
            term: 1,
            academic_year: "2024/2025".to_string(),
            start_date: date(2024, 9, 9),
            end_date: date(2024, 12, 13),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_term() {
        assert!(validate_term(1, date(2024, 9, 9), date(2024, 12, 13)).is_ok());
        assert!(validate_term(0, date(2024, 9, 9), date(2024, 12, 13)).is_err());
        assert!(validate_term(4, date(2024, 9, 9), date(2024, 12, 13)).is_err());
        assert!(validate_term(2, date(2025, 1, 10), date(2025, 1, 9)).is_err());
        assert!(validate_term(2, date(2025, 1, 1), date(2025, 6, 1)).is_err());
    }

    #[test]
    fn test_period_within_term() {
        let t = term();
        assert!(validate_period_dates(&t, date(2024, 9, 9), date(2024, 9, 13)).is_ok());
        assert!(validate_period_dates(&t, date(2024, 9, 1), date(2024, 9, 13)).is_err());
        assert!(validate_period_dates(&t, date(2024, 12, 10), date(2024, 12, 20)).is_err());
    }

    #[test]
    fn test_period_overlap() {
        let p = AttendancePeriod {
            id: 1,
            period_type: PeriodType::Weekly,
            term_id: 1,
            start_date: date(2024, 9, 9),
            end_date: date(2024, 9, 13),
            is_locked: false,
            created_at: Utc::now(),
        };
        assert!(p.overlaps(date(2024, 9, 13), date(2024, 9, 20)));
        assert!(!p.overlaps(date(2024, 9, 16), date(2024, 9, 20)));
        assert!(p.contains(date(2024, 9, 10)));
    }
}
