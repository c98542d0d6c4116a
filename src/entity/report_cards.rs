//! 成绩单实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "report_cards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub academic_year: String,
    pub term: i16,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub average_score: Decimal,
    pub overall_grade: String,
    pub is_published: bool,
    pub teacher_remarks: Option<String>,
    pub principal_remarks: Option<String>,
    pub created_by: Option<i64>,
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
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_report_card(self) -> crate::models::assessments::entities::ReportCard {
        crate::models::assessments::entities::ReportCard {
            id: self.id,
            student_id: self.student_id,
            academic_year: self.academic_year,
            term: self.term,
            average_score: crate::models::fees::entities::normalize_money(self.average_score),
            overall_grade: self.overall_grade,
            is_published: self.is_published,
            teacher_remarks: self.teacher_remarks,
            principal_remarks: self.principal_remarks,
            created_by: self.created_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
