//! 学校配置实体（单行，id 固定为 1）

use sea_orm::entity::prelude::*;

use super::to_datetime;

pub const SINGLETON_ID: i64 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "school_configuration")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub school_name: String,
    pub grading_system: String,
    pub is_locked: bool,
    pub updated_by: Option<i64>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_configuration(self) -> crate::models::system::entities::SchoolConfiguration {
        use crate::models::system::entities::{GradingSystem, SchoolConfiguration};

        SchoolConfiguration {
            school_name: self.school_name,
            grading_system: self
                .grading_system
                .parse::<GradingSystem>()
                .unwrap_or(GradingSystem::Ges),
            is_locked: self.is_locked,
            updated_by: self.updated_by,
            updated_at: to_datetime(self.updated_at),
        }
    }
}
