//! 学期实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academic_terms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub term: i16,
    pub academic_year: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_periods::Entity")]
    AttendancePeriods,
}

impl Related<super::attendance_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendancePeriods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_term(self) -> crate::models::academics::entities::AcademicTerm {
        crate::models::academics::entities::AcademicTerm {
            id: self.id,
            term: self.term,
            academic_year: self.academic_year,
            start_date: self.start_date,
            end_date: self.end_date,
            is_active: self.is_active,
            created_at: to_datetime(self.created_at),
        }
    }
}
