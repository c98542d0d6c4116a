//! 缴费记录实体

use sea_orm::entity::prelude::*;

use super::to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub fee_id: i64,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub payment_date: chrono::NaiveDate,
    pub payment_mode: String,
    #[sea_orm(unique)]
    pub receipt_number: String,
    pub recorded_by: Option<i64>,
    pub notes: Option<String>,
    pub bank_reference: Option<String>,
    pub is_confirmed: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fees::Entity",
        from = "Column::FeeId",
        to = "super::fees::Column::Id",
        on_delete = "Cascade"
    )]
    Fee,
}

impl Related<super::fees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_payment(self) -> crate::models::fees::entities::FeePayment {
        use crate::models::fees::entities::{FeePayment, PaymentMode, normalize_money};

        FeePayment {
            id: self.id,
            fee_id: self.fee_id,
            amount: normalize_money(self.amount),
            payment_date: self.payment_date,
            payment_mode: self
                .payment_mode
                .parse::<PaymentMode>()
                .unwrap_or(PaymentMode::Other),
            receipt_number: self.receipt_number,
            recorded_by: self.recorded_by,
            notes: self.notes,
            bank_reference: self.bank_reference,
            is_confirmed: self.is_confirmed,
            created_at: to_datetime(self.created_at),
        }
    }
}
