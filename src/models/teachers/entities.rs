use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::academics::entities::Subject;
use crate::models::common::ClassLevel;
use crate::models::students::entities::Gender;

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub class_levels: Vec<ClassLevel>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Teacher {
    pub fn teaches(&self, level: ClassLevel) -> bool {
        self.class_levels.contains(&level)
    }
}

// 教师及其任教科目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub teacher: Teacher,
    pub subjects: Vec<Subject>,
}
