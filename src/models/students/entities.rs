use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::ClassLevel;
use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "student.ts")]
    pub enum Gender("性别") {
        Male => "M",
        Female => "F",
    }
}

string_enum! {
    /// 监护人与学生的关系
    #[ts(export, export_to = "student.ts")]
    pub enum Relationship("监护关系") {
        Father => "F",
        Mother => "M",
        Brother => "B",
        Sister => "S",
        Other => "O",
        Guardian => "G",
    }
}

// 学生档案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct Student {
    pub id: i64,
    /// 学号（业务标识，全局唯一）
    pub student_id: String,
    pub user_id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub nationality: String,
    pub ethnicity: Option<String>,
    pub religion: Option<String>,
    pub place_of_birth: Option<String>,
    pub residential_address: String,
    pub class_level: ClassLevel,
    pub admission_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) if !middle.trim().is_empty() => {
                format!("{} {} {}", self.first_name, middle.trim(), self.last_name)
            }
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

// 家长/监护人
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ParentGuardian {
    pub id: i64,
    pub user_id: Option<i64>,
    pub student_id: i64,
    pub full_name: String,
    pub occupation: Option<String>,
    pub relationship: Relationship,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_emergency_contact: bool,
    pub emergency_contact_priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
