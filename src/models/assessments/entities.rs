use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::fees::entities::normalize_money;
use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "assessment.ts")]
    pub enum AssignmentType("作业类型") {
        Homework => "HOMEWORK",
        Classwork => "CLASSWORK",
        Test => "TEST",
        Exam => "EXAM",
    }
}

string_enum! {
    #[ts(export, export_to = "assessment.ts")]
    pub enum SubmissionStatus("提交状态") {
        Pending => "PENDING",
        Submitted => "SUBMITTED",
        Late => "LATE",
        Graded => "GRADED",
    }
}

impl SubmissionStatus {
    /// 按提交日期与截止日期确定提交状态
    pub fn on_submit(submitted_on: NaiveDate, due_date: NaiveDate) -> Self {
        if submitted_on > due_date {
            SubmissionStatus::Late
        } else {
            SubmissionStatus::Submitted
        }
    }
}

// 作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub assignment_type: AssignmentType,
    pub subject_id: i64,
    pub class_assignment_id: i64,
    pub due_date: NaiveDate,
    pub max_score: i32,
    pub weight: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// 学生作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct StudentAssignment {
    pub id: i64,
    pub student_id: i64,
    pub assignment_id: i64,
    pub status: SubmissionStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    #[ts(type = "string | null")]
    pub score: Option<Decimal>,
    pub feedback: Option<String>,
    pub graded_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// 各分项满分
pub const CLASSWORK_MAX: i64 = 30;
pub const HOMEWORK_MAX: i64 = 10;
pub const TEST_MAX: i64 = 10;
pub const EXAM_MAX: i64 = 50;

// 成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_assignment_id: Option<i64>,
    pub academic_year: String,
    pub term: i16,
    #[ts(type = "string")]
    pub classwork_score: Decimal,
    #[ts(type = "string")]
    pub homework_score: Decimal,
    #[ts(type = "string")]
    pub test_score: Decimal,
    #[ts(type = "string")]
    pub exam_score: Decimal,
    #[ts(type = "string")]
    pub total_score: Decimal,
    pub ges_grade: String,
    pub remarks: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 成绩分项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreParts {
    pub classwork: Decimal,
    pub homework: Decimal,
    pub test: Decimal,
    pub exam: Decimal,
}

impl ScoreParts {
    pub fn validate(&self) -> Result<(), String> {
        let parts = [
            ("Classwork", self.classwork, CLASSWORK_MAX),
            ("Homework", self.homework, HOMEWORK_MAX),
            ("Test", self.test, TEST_MAX),
            ("Exam", self.exam, EXAM_MAX),
        ];
        for (name, value, max) in parts {
            if value < Decimal::ZERO || value > Decimal::from(max) {
                return Err(format!("{name} score must be between 0 and {max}"));
            }
        }
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        normalize_money(self.classwork + self.homework + self.test + self.exam)
    }
}

/// 十分一档：90 及以上为 0 档，20 以下为 8 档
fn band(score: Decimal) -> usize {
    let thresholds = [90, 80, 70, 60, 50, 40, 30, 20];
    thresholds
        .iter()
        .position(|t| score >= Decimal::from(*t))
        .unwrap_or(thresholds.len())
}

/// GES 等级 "1".."9"
pub fn ges_grade(score: Decimal) -> &'static str {
    const GES: [&str; 9] = ["1", "2", "3", "4", "5", "6", "7", "8", "9"];
    GES[band(score)]
}

/// 成绩单等级 A+ .. E
pub fn letter_grade(score: Decimal) -> &'static str {
    const LETTERS: [&str; 9] = ["A+", "A", "B+", "B", "C+", "C", "D+", "D", "E"];
    LETTERS[band(score)]
}

/// 学期平均分，无成绩时为 0.00
pub fn average_score(totals: &[Decimal]) -> Decimal {
    if totals.is_empty() {
        return normalize_money(Decimal::ZERO);
    }
    let sum: Decimal = totals.iter().copied().sum();
    normalize_money(sum / Decimal::from(totals.len() as i64))
}

// 成绩单
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct ReportCard {
    pub id: i64,
    pub student_id: i64,
    pub academic_year: String,
    pub term: i16,
    #[ts(type = "string")]
    pub average_score: Decimal,
    pub overall_grade: String,
    pub is_published: bool,
    pub teacher_remarks: Option<String>,
    pub principal_remarks: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(ges_grade(dec("100")), "1");
        assert_eq!(ges_grade(dec("90.00")), "1");
        assert_eq!(ges_grade(dec("89.99")), "2");
        assert_eq!(ges_grade(dec("55")), "5");
        assert_eq!(ges_grade(dec("20")), "8");
        assert_eq!(ges_grade(dec("19.5")), "9");
        assert_eq!(letter_grade(dec("91")), "A+");
        assert_eq!(letter_grade(dec("72.5")), "B+");
        assert_eq!(letter_grade(dec("0")), "E");
    }

    #[test]
    fn test_score_parts() {
        let parts = ScoreParts {
            classwork: dec("25.5"),
            homework: dec("8"),
            test: dec("7.25"),
            exam: dec("41"),
        };
        assert!(parts.validate().is_ok());
        assert_eq!(parts.total().to_string(), "81.75");

        let too_high = ScoreParts {
            exam: dec("50.01"),
            ..parts
        };
        assert!(too_high.validate().is_err());
        let negative = ScoreParts {
            homework: dec("-1"),
            ..parts
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_average_score() {
        assert_eq!(average_score(&[]).to_string(), "0.00");
        let avg = average_score(&[dec("80"), dec("71"), dec("65.5")]);
        assert_eq!(avg.to_string(), "72.17");
        assert_eq!(letter_grade(avg), "B+");
    }

    #[test]
    fn test_submission_status() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(
            SubmissionStatus::on_submit(due, due),
            SubmissionStatus::Submitted
        );
        assert_eq!(
            SubmissionStatus::on_submit(due.succ_opt().unwrap(), due),
            SubmissionStatus::Late
        );
    }
}
