//! 家长/监护人实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parent_guardians")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: Option<i64>,
    pub student_id: i64,
    pub full_name: String,
    pub occupation: Option<String>,
    pub relationship: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_emergency_contact: bool,
    pub emergency_contact_priority: i32,
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
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_parent(self) -> crate::models::students::entities::ParentGuardian {
        use crate::models::students::entities::{ParentGuardian, Relationship};

        ParentGuardian {
            id: self.id,
            user_id: self.user_id,
            student_id: self.student_id,
            full_name: self.full_name,
            occupation: self.occupation,
            relationship: self
                .relationship
                .parse::<Relationship>()
                .unwrap_or(Relationship::Other),
            phone_number: self.phone_number,
            email: self.email,
            address: self.address,
            is_emergency_contact: self.is_emergency_contact,
            emergency_contact_priority: self.emergency_contact_priority,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
