//! 出勤汇总实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_summaries")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub attendance_rate: Decimal,
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
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_summary(self) -> crate::models::attendance::entities::AttendanceSummary {
        use crate::models::attendance::entities::{AttendanceCounts, AttendanceSummary};

        let counts = AttendanceCounts {
            present: self.days_present,
            absent: self.days_absent,
            late: self.days_late,
            excused: self.days_excused,
            sick: self.days_sick,
            other: self.days_other,
        };
        AttendanceSummary {
            id: self.id,
            student_id: self.student_id,
            term_id: self.term_id,
            period_id: self.period_id,
            days_present: self.days_present,
            days_absent: self.days_absent,
            days_late: self.days_late,
            days_excused: self.days_excused,
            days_sick: self.days_sick,
            days_other: self.days_other,
            total_days: self.total_days,
            attendance_rate: crate::models::fees::entities::normalize_money(self.attendance_rate),
            present_rate: counts.present_rate(),
            ges_compliant: counts.ges_compliant(),
            rating: counts.rating(),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
