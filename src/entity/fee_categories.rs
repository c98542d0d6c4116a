//! 费用类别实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_mandatory: bool,
    pub is_active: bool,
    pub applies_to_all: bool,
    pub class_levels: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::fees::Entity")]
    Fees,
}

impl Related<super::fees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_category(self) -> crate::models::fees::entities::FeeCategory {
        use crate::models::common::ClassLevel;
        use crate::models::fees::entities::{FeeCategory, FeeCategoryName};

        FeeCategory {
            id: self.id,
            name: self
                .name
                .parse::<FeeCategoryName>()
                .unwrap_or(FeeCategoryName::Other),
            description: self.description,
            is_mandatory: self.is_mandatory,
            is_active: self.is_active,
            applies_to_all: self.applies_to_all,
            class_levels: ClassLevel::parse_list(&self.class_levels),
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
