//! 考勤周期实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_periods")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub period_type: String,
    pub term_id: i64,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub is_locked: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academic_terms::Entity",
        from = "Column::TermId",
        to = "super::academic_terms::Column::Id",
        on_delete = "Cascade"
    )]
    Term,
}

impl Related<super::academic_terms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Term.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_period(self) -> crate::models::academics::entities::AttendancePeriod {
        use crate::models::academics::entities::{AttendancePeriod, PeriodType};

        AttendancePeriod {
            id: self.id,
            period_type: self
                .period_type
                .parse::<PeriodType>()
                .unwrap_or(PeriodType::Daily),
            term_id: self.term_id,
            start_date: self.start_date,
            end_date: self.end_date,
            is_locked: self.is_locked,
            created_at: to_datetime(self.created_at),
        }
    }
}
