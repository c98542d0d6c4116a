//! 学生作业实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub assignment_id: i64,
    pub status: String,
    pub submitted_at: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub score: Option<Decimal>,
    pub feedback: Option<String>,
    pub graded_at: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student_assignment(
        self,
    ) -> crate::models::assessments::entities::StudentAssignment {
        use crate::models::assessments::entities::{StudentAssignment, SubmissionStatus};

        StudentAssignment {
            id: self.id,
            student_id: self.student_id,
            assignment_id: self.assignment_id,
            status: self
                .status
                .parse::<SubmissionStatus>()
                .unwrap_or(SubmissionStatus::Pending),
            submitted_at: self.submitted_at.map(to_datetime),
            score: self.score.map(crate::models::fees::entities::normalize_money),
            feedback: self.feedback,
            graded_at: self.graded_at.map(to_datetime),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
