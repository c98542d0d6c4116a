//! 学生实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub student_id: String,
    #[sea_orm(unique)]
    pub user_id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: chrono::NaiveDate,
    pub gender: String,
    pub nationality: String,
    pub ethnicity: Option<String>,
    pub religion: Option<String>,
    pub place_of_birth: Option<String>,
    pub residential_address: String,
    pub class_level: String,
    pub admission_date: chrono::NaiveDate,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Restrict"
    )]
    User,
    #[sea_orm(has_many = "super::parent_guardians::Entity")]
    ParentGuardians,
    #[sea_orm(has_many = "super::fees::Entity")]
    Fees,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::parent_guardians::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParentGuardians.def()
    }
}

impl Related<super::fees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::common::ClassLevel;
        use crate::models::students::entities::{Gender, Student};

        Student {
            id: self.id,
            student_id: self.student_id,
            user_id: self.user_id,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender.parse::<Gender>().unwrap_or(Gender::Male),
            nationality: self.nationality,
            ethnicity: self.ethnicity,
            religion: self.religion,
            place_of_birth: self.place_of_birth,
            residential_address: self.residential_address,
            class_level: self.class_level.parse::<ClassLevel>().unwrap_or(ClassLevel::P1),
            admission_date: self.admission_date,
            is_active: self.is_active,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
