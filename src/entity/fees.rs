//! 学生费用实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub category_id: i64,
    pub academic_year: String,
    pub term: i16,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount_payable: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount_paid: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub balance: Decimal,
    pub payment_status: String,
    pub payment_mode: Option<String>,
    pub payment_date: Option<chrono::NaiveDate>,
    pub due_date: chrono::NaiveDate,
    #[sea_orm(unique)]
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
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
        on_delete = "Restrict"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::fee_categories::Entity",
        from = "Column::CategoryId",
        to = "super::fee_categories::Column::Id",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::fee_payments::Entity")]
    Payments,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::fee_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::fee_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee(self) -> crate::models::fees::entities::Fee {
        use crate::models::fees::entities::{Fee, PaymentMode, PaymentStatus, normalize_money};

        Fee {
            id: self.id,
            student_id: self.student_id,
            category_id: self.category_id,
            academic_year: self.academic_year,
            term: self.term,
            amount_payable: normalize_money(self.amount_payable),
            amount_paid: normalize_money(self.amount_paid),
            balance: normalize_money(self.balance),
            payment_status: self
                .payment_status
                .parse::<PaymentStatus>()
                .unwrap_or(PaymentStatus::Unpaid),
            payment_mode: self
                .payment_mode
                .and_then(|m| m.parse::<PaymentMode>().ok()),
            payment_date: self.payment_date,
            due_date: self.due_date,
            receipt_number: self.receipt_number,
            notes: self.notes,
            recorded_by: self.recorded_by,
            created_at: to_datetime(self.created_at),
            updated_at: to_datetime(self.updated_at),
        }
    }
}
