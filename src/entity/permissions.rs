//! 权限实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub content_type: String,
    pub codename: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::group_permissions::Entity")]
    GroupPermissions,
    #[sea_orm(has_many = "super::user_permissions::Entity")]
    UserPermissions,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_permission(self) -> crate::models::groups::entities::Permission {
        crate::models::groups::entities::Permission {
            id: self.id,
            name: self.name,
            content_type: self.content_type,
            codename: self.codename,
        }
    }
}
