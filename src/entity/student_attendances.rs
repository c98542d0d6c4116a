//! 学生出勤记录实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_attendances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub date: chrono::NaiveDate,
    pub status: String,
    pub period_id: Option<i64>,
    pub term_id: i64,
    pub recorded_by: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::academic_terms::Entity",
        from = "Column::TermId",
        to = "super::academic_terms::Column::Id",
        on_delete = "Cascade"
    )]
    Term,
    #[sea_orm(
        belongs_to = "super::attendance_periods::Entity",
        from = "Column::PeriodId",
        to = "super::attendance_periods::Column::Id",
        on_delete = "Cascade"
    )]
    Period,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance(self) -> crate::models::attendance::entities::StudentAttendance {
        use crate::models::attendance::entities::{AttendanceStatus, StudentAttendance};

        StudentAttendance {
            id: self.id,
            student_id: self.student_id,
            date: self.date,
            status: self
                .status
                .parse::<AttendanceStatus>()
                .unwrap_or(AttendanceStatus::Absent),
            period_id: self.period_id,
            term_id: self.term_id,
            recorded_by: self.recorded_by,
            notes: self.notes,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
