//! 成绩实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub class_assignment_id: Option<i64>,
    pub academic_year: String,
    pub term: i16,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub classwork_score: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub homework_score: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub test_score: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub exam_score: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub total_score: Decimal,
    pub ges_grade: String,
    pub remarks: Option<String>,
    pub recorded_by: Option<i64>,
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
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id",
        on_delete = "Restrict"
    )]
    Subject,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(self) -> crate::models::assessments::entities::Grade {
        use crate::models::fees::entities::normalize_money;

        crate::models::assessments::entities::Grade {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            class_assignment_id: self.class_assignment_id,
            academic_year: self.academic_year,
            term: self.term,
            classwork_score: normalize_money(self.classwork_score),
            homework_score: normalize_money(self.homework_score),
            test_score: normalize_money(self.test_score),
            exam_score: normalize_money(self.exam_score),
            total_score: normalize_money(self.total_score),
            ges_grade: self.ges_grade,
            remarks: self.remarks,
            recorded_by: self.recorded_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
