use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Gender, Relationship};
use crate::models::common::pagination::{deserialize_optional_bool, deserialize_optional_i64};
use crate::models::common::{ClassLevel, PaginationQuery};

// 创建学生档案
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateStudentRequest {
    /// 省略时自动生成
    pub student_id: Option<String>,
    pub user_id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub nationality: Option<String>,
    pub ethnicity: Option<String>,
    pub religion: Option<String>,
    pub place_of_birth: Option<String>,
    pub residential_address: String,
    pub class_level: ClassLevel,
    /// 省略时为当天
    pub admission_date: Option<NaiveDate>,
}

// 更新学生档案（部分更新，重复提交结果一致）
#[derive(Debug, Clone, Default, PartialEq, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub nationality: Option<String>,
    pub ethnicity: Option<String>,
    pub religion: Option<String>,
    pub place_of_birth: Option<String>,
    pub residential_address: Option<String>,
    pub class_level: Option<ClassLevel>,
    pub admission_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

// 学生列表查询
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct StudentListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub class_level: Option<ClassLevel>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub include_inactive: Option<bool>,
    pub search: Option<String>,
    /// 由服务层按当前账号限定的可见学生
    #[serde(skip)]
    #[ts(skip)]
    pub ids: Option<Vec<i64>>,
}

// 创建家长/监护人
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct CreateParentRequest {
    pub user_id: Option<i64>,
    pub student_id: i64,
    pub full_name: String,
    pub occupation: Option<String>,
    pub relationship: Relationship,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub is_emergency_contact: bool,
    #[serde(default = "default_priority")]
    pub emergency_contact_priority: i32,
}

fn default_priority() -> i32 {
    1
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct UpdateParentRequest {
    pub full_name: Option<String>,
    pub occupation: Option<String>,
    pub relationship: Option<Relationship>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_emergency_contact: Option<bool>,
    pub emergency_contact_priority: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "student.ts")]
pub struct ParentListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    pub search: Option<String>,
    #[serde(skip)]
    #[ts(skip)]
    pub student_ids: Option<Vec<i64>>,
}
