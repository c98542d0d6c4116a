//! 作业实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub assignment_type: String,
    pub subject_id: i64,
    pub class_assignment_id: i64,
    pub due_date: chrono::NaiveDate,
    pub max_score: i32,
    pub weight: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_assignments::Entity",
        from = "Column::ClassAssignmentId",
        to = "super::class_assignments::Column::Id",
        on_delete = "Cascade"
    )]
    ClassAssignment,
    #[sea_orm(has_many = "super::student_assignments::Entity")]
    StudentAssignments,
}

impl Related<super::student_assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentAssignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assessments::entities::Assignment {
        use crate::models::assessments::entities::{Assignment, AssignmentType};

        Assignment {
            id: self.id,
            title: self.title,
            description: self.description,
            assignment_type: self
                .assignment_type
                .parse::<AssignmentType>()
                .unwrap_or(AssignmentType::Homework),
            subject_id: self.subject_id,
            class_assignment_id: self.class_assignment_id,
            due_date: self.due_date,
            max_score: self.max_score,
            weight: self.weight,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
