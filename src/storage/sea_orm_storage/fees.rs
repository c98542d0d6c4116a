use super::{SeaOrmStorage, paginate};
use crate::entity::{fee_categories, fee_payments, fees};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ClassLevel,
    fees::{
        entities::{
            Fee, FeeCategory, FeePayment, PaymentStatus, derive_fee, normalize_money,
            validate_fee_amounts,
        },
        requests::{
            CreateFeeCategoryRequest, CreateFeeRequest, FeeCategoryListQuery, FeeListQuery,
            FeeSummaryQuery, RecordPaymentRequest, UpdateFeeCategoryRequest, UpdateFeeRequest,
        },
        responses::{
            FeeCategoryListResponse, FeeListResponse, PaymentRecordedResponse, StudentFeeSummary,
        },
    },
};
use crate::utils::random_code::generate_receipt_number;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 收据号生成的最大尝试次数
const RECEIPT_ATTEMPTS: usize = 8;

/// 生成一个在缴费记录和费用中均未被占用的收据号
async fn unique_receipt_number<C: ConnectionTrait>(db: &C) -> Result<String> {
    for _ in 0..RECEIPT_ATTEMPTS {
        let candidate = generate_receipt_number();
        let in_payments = fee_payments::Entity::find()
            .filter(fee_payments::Column::ReceiptNumber.eq(candidate.as_str()))
            .count(db)
            .await
            .map_err(|e| SchoolError::from_db("查询收据号失败", e))?;
        let in_fees = fees::Entity::find()
            .filter(fees::Column::ReceiptNumber.eq(candidate.as_str()))
            .count(db)
            .await
            .map_err(|e| SchoolError::from_db("查询收据号失败", e))?;
        if in_payments == 0 && in_fees == 0 {
            return Ok(candidate);
        }
    }
    Err(SchoolError::database_operation(
        "Unable to allocate a unique receipt number",
    ))
}

/// 费用上的收据号是否由该费用的某次缴费生成（手工录入的收据号返回 false）
async fn has_generated_receipt<C: ConnectionTrait>(db: &C, fee: &fees::Model) -> Result<bool> {
    let Some(receipt) = fee.receipt_number.as_deref() else {
        return Ok(true);
    };
    let matches = fee_payments::Entity::find()
        .filter(fee_payments::Column::FeeId.eq(fee.id))
        .filter(fee_payments::Column::ReceiptNumber.eq(receipt))
        .count(db)
        .await
        .map_err(|e| SchoolError::from_db("查询收据号失败", e))?;
    Ok(matches > 0)
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

impl SeaOrmStorage {
    // ---------- 费用类别 ----------

    pub async fn create_fee_category_impl(
        &self,
        req: CreateFeeCategoryRequest,
    ) -> Result<FeeCategory> {
        let now = chrono::Utc::now().timestamp();
        let model = fee_categories::ActiveModel {
            name: Set(req.name.to_string()),
            description: Set(req.description),
            is_mandatory: Set(req.is_mandatory),
            is_active: Set(true),
            applies_to_all: Set(req.applies_to_all),
            class_levels: Set(ClassLevel::join_list(&req.class_levels)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建费用类别失败", e))?;
        Ok(result.into_category())
    }

    pub async fn get_fee_category_by_id_impl(&self, id: i64) -> Result<Option<FeeCategory>> {
        let result = fee_categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询费用类别失败", e))?;
        Ok(result.map(|m| m.into_category()))
    }

    pub async fn list_fee_categories_with_pagination_impl(
        &self,
        query: FeeCategoryListQuery,
    ) -> Result<FeeCategoryListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = fee_categories::Entity::find();
        if let Some(is_active) = query.is_active {
            select = select.filter(fee_categories::Column::IsActive.eq(is_active));
        }

        let select = select
            .order_by_asc(fee_categories::Column::Name)
            .order_by_asc(fee_categories::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "费用类别").await?;
        Ok(FeeCategoryListResponse {
            items: rows.into_iter().map(|m| m.into_category()).collect(),
            pagination,
        })
    }

    pub async fn update_fee_category_impl(
        &self,
        id: i64,
        update: UpdateFeeCategoryRequest,
    ) -> Result<Option<FeeCategory>> {
        let Some(existing) = fee_categories::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询费用类别失败", e))?
        else {
            return Ok(None);
        };

        let mut model: fee_categories::ActiveModel = existing.clone().into();
        if let Some(v) = update.name {
            model.name.set_if_not_equals(v.to_string());
        }
        if let Some(v) = update.description {
            model.description.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.is_mandatory {
            model.is_mandatory.set_if_not_equals(v);
        }
        if let Some(v) = update.is_active {
            model.is_active.set_if_not_equals(v);
        }
        if let Some(v) = update.applies_to_all {
            model.applies_to_all.set_if_not_equals(v);
        }
        if let Some(levels) = update.class_levels {
            model
                .class_levels
                .set_if_not_equals(ClassLevel::join_list(&levels));
        }
        if !model.is_changed() {
            return Ok(Some(existing.into_category()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新费用类别失败", e))?;
        Ok(Some(updated.into_category()))
    }

    /// 删除费用类别；已有费用引用时由外键拒绝
    pub async fn delete_fee_category_impl(&self, id: i64) -> Result<bool> {
        let result = fee_categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除费用类别失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 费用 ----------

    /// 创建费用，余额与状态由 derive_fee 推导
    pub async fn create_fee_impl(&self, req: CreateFeeRequest) -> Result<Fee> {
        let payable = normalize_money(req.amount_payable);
        let paid = normalize_money(req.amount_paid);
        validate_fee_amounts(payable, paid).map_err(SchoolError::validation)?;

        let derived = derive_fee(payable, paid, req.payment_date, today());
        let now = chrono::Utc::now().timestamp();

        let model = fees::ActiveModel {
            student_id: Set(req.student_id),
            category_id: Set(req.category_id),
            academic_year: Set(req.academic_year),
            term: Set(req.term),
            amount_payable: Set(payable),
            amount_paid: Set(paid),
            balance: Set(derived.balance),
            payment_status: Set(derived.payment_status.to_string()),
            payment_mode: Set(req.payment_mode.map(|m| m.to_string())),
            payment_date: Set(derived.payment_date),
            due_date: Set(req.due_date),
            receipt_number: Set(req.receipt_number.filter(|r| !r.trim().is_empty())),
            notes: Set(req.notes),
            recorded_by: Set(req.recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建费用失败", e))?;
        Ok(result.into_fee())
    }

    pub async fn get_fee_by_id_impl(&self, id: i64) -> Result<Option<Fee>> {
        let result = fees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询费用失败", e))?;
        Ok(result.map(|m| m.into_fee()))
    }

    pub async fn list_fees_with_pagination_impl(
        &self,
        query: FeeListQuery,
    ) -> Result<FeeListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = fees::Entity::find();

        if let Some(ids) = query.student_ids {
            select = select.filter(fees::Column::StudentId.is_in(ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(fees::Column::StudentId.eq(student_id));
        }
        if let Some(category_id) = query.category_id {
            select = select.filter(fees::Column::CategoryId.eq(category_id));
        }
        if let Some(status) = query.payment_status {
            select = select.filter(fees::Column::PaymentStatus.eq(status.as_str()));
        }
        if let Some(ref year) = query.academic_year {
            select = select.filter(fees::Column::AcademicYear.eq(year.as_str()));
        }
        if let Some(term) = query.term {
            select = select.filter(fees::Column::Term.eq(term));
        }

        // 逾期：due_date 早于截止日期且未结清
        if let Some(overdue) = query.overdue {
            let cutoff = query.overdue_before.unwrap_or_else(today);
            let not_paid = fees::Column::PaymentStatus.ne(PaymentStatus::Paid.as_str());
            select = if overdue {
                select
                    .filter(fees::Column::DueDate.lt(cutoff))
                    .filter(not_paid)
            } else {
                select.filter(
                    Condition::any()
                        .add(fees::Column::DueDate.gte(cutoff))
                        .add(fees::Column::PaymentStatus.eq(PaymentStatus::Paid.as_str())),
                )
            };
        }

        let select = select
            .order_by_asc(fees::Column::DueDate)
            .order_by_desc(fees::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "费用").await?;
        Ok(FeeListResponse {
            items: rows.into_iter().map(|m| m.into_fee()).collect(),
            pagination,
        })
    }

    /// 修改费用；金额合并后重新校验并推导余额与状态
    pub async fn update_fee_impl(&self, id: i64, update: UpdateFeeRequest) -> Result<Option<Fee>> {
        let Some(existing) = fees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询费用失败", e))?
        else {
            return Ok(None);
        };

        let payable = normalize_money(update.amount_payable.unwrap_or(existing.amount_payable));
        let paid = normalize_money(update.amount_paid.unwrap_or(existing.amount_paid));
        validate_fee_amounts(payable, paid).map_err(SchoolError::validation)?;

        let requested_date = update.payment_date.or(existing.payment_date);
        let derived = derive_fee(payable, paid, requested_date, today());

        let mut model: fees::ActiveModel = existing.clone().into();
        if let Some(v) = update.category_id {
            model.category_id.set_if_not_equals(v);
        }
        if let Some(v) = update.academic_year {
            model.academic_year.set_if_not_equals(v);
        }
        if let Some(v) = update.term {
            model.term.set_if_not_equals(v);
        }
        if let Some(v) = update.payment_mode {
            model.payment_mode.set_if_not_equals(Some(v.to_string()));
        }
        if let Some(v) = update.due_date {
            model.due_date.set_if_not_equals(v);
        }
        if let Some(v) = update.receipt_number {
            let receipt = Some(v).filter(|r| !r.trim().is_empty());
            model.receipt_number.set_if_not_equals(receipt);
        }
        if let Some(v) = update.notes {
            model.notes.set_if_not_equals(Some(v));
        }
        model.amount_payable.set_if_not_equals(payable);
        model.amount_paid.set_if_not_equals(paid);
        model.balance.set_if_not_equals(derived.balance);
        model
            .payment_status
            .set_if_not_equals(derived.payment_status.to_string());
        model.payment_date.set_if_not_equals(derived.payment_date);

        if !model.is_changed() {
            return Ok(Some(existing.into_fee()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新费用失败", e))?;
        Ok(Some(updated.into_fee()))
    }

    pub async fn delete_fee_impl(&self, id: i64) -> Result<bool> {
        let result = fees::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除费用失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 缴费 ----------

    /// 登记缴费并在同一事务内重新推导费用
    pub async fn record_payment_impl(
        &self,
        fee_id: i64,
        req: RecordPaymentRequest,
    ) -> Result<Option<PaymentRecordedResponse>> {
        let amount = normalize_money(req.amount);
        if amount <= Decimal::ZERO {
            return Err(SchoolError::validation("Payment amount must be positive"));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let Some(fee) = fees::Entity::find_by_id(fee_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::from_db("查询费用失败", e))?
        else {
            return Ok(None);
        };

        let balance = normalize_money(fee.balance);
        if amount > balance {
            return Err(SchoolError::validation(format!(
                "Payment amount {amount} exceeds the outstanding balance {balance}"
            )));
        }

        let payment_date = req.payment_date.unwrap_or_else(today);
        let receipt_number = unique_receipt_number(&txn).await?;

        let payment = fee_payments::ActiveModel {
            fee_id: Set(fee.id),
            amount: Set(amount),
            payment_date: Set(payment_date),
            payment_mode: Set(req.payment_mode.to_string()),
            receipt_number: Set(receipt_number.clone()),
            recorded_by: Set(req.recorded_by),
            notes: Set(req.notes),
            bank_reference: Set(req.bank_reference),
            is_confirmed: Set(req.is_confirmed),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolError::from_db("写入缴费记录失败", e))?;

        let follow_payment_receipt = has_generated_receipt(&txn, &fee).await?;
        let payable = normalize_money(fee.amount_payable);
        let paid = normalize_money(fee.amount_paid + amount);
        let derived = derive_fee(payable, paid, Some(payment_date), today());

        let mut model: fees::ActiveModel = fee.into();
        model.amount_paid = Set(paid);
        model.balance = Set(derived.balance);
        model.payment_status = Set(derived.payment_status.to_string());
        model.payment_date = Set(derived.payment_date);
        model.payment_mode = Set(Some(req.payment_mode.to_string()));
        if follow_payment_receipt {
            model.receipt_number = Set(Some(receipt_number));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let fee = model
            .update(&txn)
            .await
            .map_err(|e| SchoolError::from_db("更新费用失败", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;

        Ok(Some(PaymentRecordedResponse {
            fee: fee.into_fee(),
            payment: payment.into_payment(),
        }))
    }

    pub async fn list_fee_payments_impl(&self, fee_id: i64) -> Result<Vec<FeePayment>> {
        let rows = fee_payments::Entity::find()
            .filter(fee_payments::Column::FeeId.eq(fee_id))
            .order_by_desc(fee_payments::Column::PaymentDate)
            .order_by_desc(fee_payments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询缴费记录失败", e))?;
        Ok(rows.into_iter().map(|m| m.into_payment()).collect())
    }

    /// 学生费用合计
    pub async fn get_student_fee_summary_impl(
        &self,
        student_id: i64,
        query: FeeSummaryQuery,
    ) -> Result<StudentFeeSummary> {
        let mut select = fees::Entity::find().filter(fees::Column::StudentId.eq(student_id));
        if let Some(ref year) = query.academic_year {
            select = select.filter(fees::Column::AcademicYear.eq(year.as_str()));
        }
        if let Some(term) = query.term {
            select = select.filter(fees::Column::Term.eq(term));
        }

        let rows = select
            .order_by_asc(fees::Column::DueDate)
            .order_by_asc(fees::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生费用失败", e))?;
        let fees: Vec<Fee> = rows.into_iter().map(|m| m.into_fee()).collect();

        let total_payable = normalize_money(fees.iter().map(|f| f.amount_payable).sum());
        let total_paid = normalize_money(fees.iter().map(|f| f.amount_paid).sum());
        let total_balance = normalize_money(fees.iter().map(|f| f.balance).sum());

        Ok(StudentFeeSummary {
            student_id,
            fee_count: fees.len() as i64,
            total_payable,
            total_paid,
            total_balance,
            fees,
        })
    }
}
