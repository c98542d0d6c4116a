use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::deserialize_optional_bool;
use crate::models::common::{ClassLevel, PaginationQuery};
use crate::models::students::entities::Gender;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct CreateTeacherRequest {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub class_levels: Vec<ClassLevel>,
    #[serde(default)]
    pub subject_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct UpdateTeacherRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub class_levels: Option<Vec<ClassLevel>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct SetTeacherSubjectsRequest {
    pub subject_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "teacher.ts")]
pub struct TeacherListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_level: Option<ClassLevel>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_inactive: Option<bool>,
    pub search: Option<String>,
}
