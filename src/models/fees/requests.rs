use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{FeeCategoryName, PaymentMode, PaymentStatus};
use crate::models::common::pagination::{deserialize_optional_bool, deserialize_optional_i64};
use crate::models::common::{ClassLevel, PaginationQuery};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct CreateFeeCategoryRequest {
    pub name: FeeCategoryName,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_mandatory: bool,
    #[serde(default = "default_true")]
    pub applies_to_all: bool,
    #[serde(default)]
    pub class_levels: Vec<ClassLevel>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct UpdateFeeCategoryRequest {
    pub name: Option<FeeCategoryName>,
    pub description: Option<String>,
    pub is_mandatory: Option<bool>,
    pub is_active: Option<bool>,
    pub applies_to_all: Option<bool>,
    pub class_levels: Option<Vec<ClassLevel>>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeeCategoryListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub is_active: Option<bool>,
}

// 创建费用；余额与状态由服务端推导，不接受客户端传入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct CreateFeeRequest {
    pub student_id: i64,
    pub category_id: i64,
    pub academic_year: String,
    pub term: i16,
    #[ts(type = "string")]
    pub amount_payable: Decimal,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub amount_paid: Decimal,
    pub payment_mode: Option<PaymentMode>,
    pub payment_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
    #[serde(skip)]
    #[ts(skip)]
    pub recorded_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct UpdateFeeRequest {
    pub category_id: Option<i64>,
    pub academic_year: Option<String>,
    pub term: Option<i16>,
    #[ts(type = "string | null")]
    pub amount_payable: Option<Decimal>,
    #[ts(type = "string | null")]
    pub amount_paid: Option<Decimal>,
    pub payment_mode: Option<PaymentMode>,
    pub payment_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeeListQuery {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub category_id: Option<i64>,
    pub payment_status: Option<PaymentStatus>,
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub overdue: Option<bool>,
    #[serde(skip)]
    #[ts(skip)]
    pub student_ids: Option<Vec<i64>>,
    /// 逾期判定的截止日期（due_date + 宽限期 < today）
    #[serde(skip)]
    #[ts(skip)]
    pub overdue_before: Option<NaiveDate>,
}

// 登记一笔缴费
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct RecordPaymentRequest {
    #[ts(type = "string")]
    pub amount: Decimal,
    pub payment_mode: PaymentMode,
    pub payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub bank_reference: Option<String>,
    #[serde(default)]
    pub is_confirmed: bool,
    #[serde(skip)]
    #[ts(skip)]
    pub recorded_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeeSummaryQuery {
    pub academic_year: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub term: Option<i64>,
}
