//! 班级科目分配实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_level: String,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub academic_year: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id",
        on_delete = "Restrict"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id",
        on_delete = "Restrict"
    )]
    Teacher,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_class_assignment(self) -> crate::models::academics::entities::ClassAssignment {
        use crate::models::common::ClassLevel;

        crate::models::academics::entities::ClassAssignment {
            id: self.id,
            class_level: self.class_level.parse::<ClassLevel>().unwrap_or(ClassLevel::P1),
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            academic_year: self.academic_year,
            created_at: to_datetime(self.created_at),
        }
    }
}
