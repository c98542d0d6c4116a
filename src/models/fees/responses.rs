use rust_decimal::Decimal;
use serde::Serialize;
use ts_rs::TS;

use super::entities::{Fee, FeeCategory, FeePayment};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeeCategoryListResponse {
    pub items: Vec<FeeCategory>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeeListResponse {
    pub items: Vec<Fee>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct PaymentRecordedResponse {
    pub fee: Fee,
    pub payment: FeePayment,
}

// 学生费用汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct StudentFeeSummary {
    pub student_id: i64,
    pub fee_count: i64,
    #[ts(type = "string")]
    pub total_payable: Decimal,
    #[ts(type = "string")]
    pub total_paid: Decimal,
    #[ts(type = "string")]
    pub total_balance: Decimal,
    pub fees: Vec<Fee>,
}
