use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::ClassLevel;
use crate::string_enum;

string_enum! {
    #[ts(export, export_to = "fee.ts")]
    pub enum FeeCategoryName("费用类别") {
        Admission => "ADMISSION",
        Tuition => "TUITION",
        Feeding => "FEEDING",
        Uniform => "UNIFORM",
        Books => "BOOKS",
        Transport => "TRANSPORT",
        Other => "OTHER",
    }
}

string_enum! {
    #[ts(export, export_to = "fee.ts")]
    pub enum PaymentStatus("缴费状态") {
        Paid => "PAID",
        Partial => "PARTIAL",
        Unpaid => "UNPAID",
    }
}

string_enum! {
    #[ts(export, export_to = "fee.ts")]
    pub enum PaymentMode("支付方式") {
        Cash => "cash",
        Check => "check",
        BankTransfer => "bank_transfer",
        MobileMoney => "mobile_money",
        Other => "other",
    }
}

// 费用类别
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeeCategory {
    pub id: i64,
    pub name: FeeCategoryName,
    pub description: Option<String>,
    pub is_mandatory: bool,
    pub is_active: bool,
    pub applies_to_all: bool,
    pub class_levels: Vec<ClassLevel>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeeCategory {
    pub fn applies_to(&self, level: ClassLevel) -> bool {
        self.applies_to_all || self.class_levels.is_empty() || self.class_levels.contains(&level)
    }
}

// 学生费用
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct Fee {
    pub id: i64,
    pub student_id: i64,
    pub category_id: i64,
    pub academic_year: String,
    pub term: i16,
    #[ts(type = "string")]
    pub amount_payable: Decimal,
    #[ts(type = "string")]
    pub amount_paid: Decimal,
    #[ts(type = "string")]
    pub balance: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_mode: Option<PaymentMode>,
    pub payment_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fee {
    /// 宽限期过后仍未结清
    pub fn is_overdue(&self, today: NaiveDate, grace_days: i64) -> bool {
        self.payment_status != PaymentStatus::Paid
            && today > self.due_date + chrono::Duration::days(grace_days)
    }
}

// 缴费记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "fee.ts")]
pub struct FeePayment {
    pub id: i64,
    pub fee_id: i64,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub payment_mode: PaymentMode,
    pub receipt_number: String,
    pub recorded_by: Option<i64>,
    pub notes: Option<String>,
    pub bank_reference: Option<String>,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// 由应付与已付金额推导出的费用状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeDerivation {
    pub balance: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<NaiveDate>,
}

/// 金额统一为两位小数
pub fn normalize_money(amount: Decimal) -> Decimal {
    let mut value = amount.round_dp(2);
    value.rescale(2);
    value
}

/// 费用余额与状态的唯一计算入口，所有写路径（创建、修改、缴费）都经过这里
///
/// - balance = amount_payable - amount_paid
/// - 余额为 0 时为 PAID，已付部分金额时为 PARTIAL，否则 UNPAID
/// - 变为 PAID 且没有缴费日期时记为当天；非 PAID 时清空缴费日期
pub fn derive_fee(
    amount_payable: Decimal,
    amount_paid: Decimal,
    payment_date: Option<NaiveDate>,
    today: NaiveDate,
) -> FeeDerivation {
    let balance = normalize_money(amount_payable - amount_paid);
    let payment_status = if balance.is_zero() {
        PaymentStatus::Paid
    } else if balance > Decimal::ZERO && balance < amount_payable {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Unpaid
    };
    let payment_date = match payment_status {
        PaymentStatus::Paid => Some(payment_date.unwrap_or(today)),
        _ => None,
    };
    FeeDerivation {
        balance,
        payment_status,
        payment_date,
    }
}

/// 校验金额取值：应付至少 0.01，已付不为负且不超过应付
pub fn validate_fee_amounts(amount_payable: Decimal, amount_paid: Decimal) -> Result<(), String> {
    if amount_payable < Decimal::new(1, 2) {
        return Err("Amount payable must be at least 0.01".to_string());
    }
    if amount_paid < Decimal::ZERO {
        return Err("Amount paid cannot be negative".to_string());
    }
    if amount_paid > amount_payable {
        return Err("Amount paid cannot exceed amount payable".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_partial_payment_scenario() {
        let d = derive_fee(dec("2000.00"), dec("1800.00"), None, today());
        assert_eq!(d.balance, dec("200.00"));
        assert_eq!(d.balance.to_string(), "200.00");
        assert_eq!(d.payment_status, PaymentStatus::Partial);
        assert_eq!(d.payment_status.as_str(), "PARTIAL");
        assert_eq!(d.payment_date, None);
    }

    #[test]
    fn test_paid_sets_payment_date() {
        let d = derive_fee(dec("500"), dec("500.00"), None, today());
        assert_eq!(d.balance, Decimal::ZERO);
        assert_eq!(d.payment_status, PaymentStatus::Paid);
        assert_eq!(d.payment_date, Some(today()));

        let earlier = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let d = derive_fee(dec("500"), dec("500"), Some(earlier), today());
        assert_eq!(d.payment_date, Some(earlier));
    }

    #[test]
    fn test_nothing_paid_is_unpaid() {
        let earlier = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let d = derive_fee(dec("750.50"), Decimal::ZERO, Some(earlier), today());
        assert_eq!(d.balance, dec("750.50"));
        assert_eq!(d.payment_status, PaymentStatus::Unpaid);
        assert_eq!(d.payment_date, None);
    }

    #[test]
    fn test_validate_amounts() {
        assert!(validate_fee_amounts(dec("0.01"), Decimal::ZERO).is_ok());
        assert!(validate_fee_amounts(Decimal::ZERO, Decimal::ZERO).is_err());
        assert!(validate_fee_amounts(dec("10"), dec("-1")).is_err());
        assert!(validate_fee_amounts(dec("10"), dec("10.01")).is_err());
    }

    #[test]
    fn test_overdue_respects_grace_days() {
        let fee = Fee {
            id: 1,
            student_id: 1,
            category_id: 1,
            academic_year: "2024/2025".to_string(),
            term: 2,
            amount_payable: dec("100"),
            amount_paid: Decimal::ZERO,
            balance: dec("100"),
            payment_status: PaymentStatus::Unpaid,
            payment_mode: None,
            payment_date: None,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            receipt_number: None,
            notes: None,
            recorded_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(fee.is_overdue(today(), 0));
        assert!(!fee.is_overdue(today(), 7));
    }
}
