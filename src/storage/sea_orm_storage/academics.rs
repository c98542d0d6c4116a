use super::{SeaOrmStorage, paginate};
use crate::entity::{academic_terms, attendance_periods, class_assignments, subjects};
use crate::errors::{Result, SchoolError};
use crate::models::academics::{
    entities::{
        AcademicTerm, AttendancePeriod, ClassAssignment, PeriodType, Subject,
        validate_period_dates, validate_term,
    },
    requests::{
        ClassAssignmentListQuery, CreateClassAssignmentRequest, CreatePeriodRequest,
        CreateSubjectRequest, CreateTermRequest, PeriodListQuery, SubjectListQuery, TermListQuery,
        UpdateClassAssignmentRequest, UpdatePeriodRequest, UpdateSubjectRequest,
        UpdateTermRequest,
    },
    responses::{
        ClassAssignmentListResponse, PeriodListResponse, SubjectListResponse, TermListResponse,
    },
};
use crate::utils::escape_like_pattern;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 停用同学年的其他学期
async fn deactivate_sibling_terms<C: ConnectionTrait>(
    db: &C,
    academic_year: &str,
    keep_id: i64,
) -> Result<()> {
    academic_terms::Entity::update_many()
        .col_expr(
            academic_terms::Column::IsActive,
            sea_orm::sea_query::Expr::value(false),
        )
        .filter(academic_terms::Column::AcademicYear.eq(academic_year))
        .filter(academic_terms::Column::Id.ne(keep_id))
        .exec(db)
        .await
        .map_err(|e| SchoolError::from_db("停用其他学期失败", e))?;
    Ok(())
}

/// 同学期同类型周期不得重叠
async fn ensure_no_overlap<C: ConnectionTrait>(
    db: &C,
    term_id: i64,
    period_type: PeriodType,
    start: NaiveDate,
    end: NaiveDate,
    exclude_id: Option<i64>,
) -> Result<()> {
    let mut select = attendance_periods::Entity::find()
        .filter(attendance_periods::Column::TermId.eq(term_id))
        .filter(attendance_periods::Column::PeriodType.eq(period_type.as_str()))
        .filter(attendance_periods::Column::StartDate.lte(end))
        .filter(attendance_periods::Column::EndDate.gte(start));
    if let Some(id) = exclude_id {
        select = select.filter(attendance_periods::Column::Id.ne(id));
    }

    let clash = select
        .one(db)
        .await
        .map_err(|e| SchoolError::from_db("查询考勤周期失败", e))?;
    if let Some(other) = clash {
        return Err(SchoolError::validation(format!(
            "Period overlaps an existing {} period ({} - {})",
            period_type,
            other.start_date,
            other.end_date
        )));
    }
    Ok(())
}

impl SeaOrmStorage {
    // ---------- 科目 ----------

    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();
        let model = subjects::ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建科目失败", e))?;
        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询科目失败", e))?;
        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = subjects::Entity::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(subjects::Column::Name.contains(&escaped))
                    .add(subjects::Column::Code.contains(&escaped)),
            );
        }

        let select = select.order_by_asc(subjects::Column::Name);
        let (rows, pagination) = paginate(&self.db, select, page, size, "科目").await?;
        Ok(SubjectListResponse {
            items: rows.into_iter().map(|m| m.into_subject()).collect(),
            pagination,
        })
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let Some(existing) = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询科目失败", e))?
        else {
            return Ok(None);
        };

        let mut model: subjects::ActiveModel = existing.clone().into();
        if let Some(v) = update.name {
            model.name.set_if_not_equals(v);
        }
        if let Some(v) = update.code {
            model.code.set_if_not_equals(v);
        }
        if let Some(v) = update.description {
            model.description.set_if_not_equals(Some(v));
        }
        if !model.is_changed() {
            return Ok(Some(existing.into_subject()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新科目失败", e))?;
        Ok(Some(updated.into_subject()))
    }

    /// 删除科目；被授课安排或作业引用时由外键拒绝
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = subjects::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除科目失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 授课安排 ----------

    pub async fn create_class_assignment_impl(
        &self,
        req: CreateClassAssignmentRequest,
    ) -> Result<ClassAssignment> {
        let model = class_assignments::ActiveModel {
            class_level: Set(req.class_level.to_string()),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            academic_year: Set(req.academic_year),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建授课安排失败", e))?;
        Ok(result.into_class_assignment())
    }

    pub async fn get_class_assignment_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<ClassAssignment>> {
        let result = class_assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询授课安排失败", e))?;
        Ok(result.map(|m| m.into_class_assignment()))
    }

    pub async fn list_class_assignments_with_pagination_impl(
        &self,
        query: ClassAssignmentListQuery,
    ) -> Result<ClassAssignmentListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = class_assignments::Entity::find();

        if let Some(level) = query.class_level {
            select = select.filter(class_assignments::Column::ClassLevel.eq(level.as_str()));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(class_assignments::Column::SubjectId.eq(subject_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(class_assignments::Column::TeacherId.eq(teacher_id));
        }
        if let Some(ref year) = query.academic_year {
            select = select.filter(class_assignments::Column::AcademicYear.eq(year.as_str()));
        }

        let select = select
            .order_by_desc(class_assignments::Column::AcademicYear)
            .order_by_asc(class_assignments::Column::ClassLevel)
            .order_by_asc(class_assignments::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "授课安排").await?;
        Ok(ClassAssignmentListResponse {
            items: rows.into_iter().map(|m| m.into_class_assignment()).collect(),
            pagination,
        })
    }

    pub async fn update_class_assignment_impl(
        &self,
        id: i64,
        update: UpdateClassAssignmentRequest,
    ) -> Result<Option<ClassAssignment>> {
        let Some(existing) = class_assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询授课安排失败", e))?
        else {
            return Ok(None);
        };

        let mut model: class_assignments::ActiveModel = existing.clone().into();
        if let Some(level) = update.class_level {
            model.class_level.set_if_not_equals(level.to_string());
        }
        if let Some(v) = update.subject_id {
            model.subject_id.set_if_not_equals(v);
        }
        if let Some(v) = update.teacher_id {
            model.teacher_id.set_if_not_equals(v);
        }
        if let Some(v) = update.academic_year {
            model.academic_year.set_if_not_equals(v);
        }
        if !model.is_changed() {
            return Ok(Some(existing.into_class_assignment()));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新授课安排失败", e))?;
        Ok(Some(updated.into_class_assignment()))
    }

    pub async fn delete_class_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = class_assignments::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除授课安排失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 学期 ----------

    /// 创建学期；激活时在同一事务内停用同学年的其他学期
    pub async fn create_term_impl(&self, req: CreateTermRequest) -> Result<AcademicTerm> {
        validate_term(req.term, req.start_date, req.end_date).map_err(SchoolError::validation)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let model = academic_terms::ActiveModel {
            term: Set(req.term),
            academic_year: Set(req.academic_year),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            is_active: Set(req.is_active),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        let term = model
            .insert(&txn)
            .await
            .map_err(|e| SchoolError::from_db("创建学期失败", e))?;

        if term.is_active {
            deactivate_sibling_terms(&txn, &term.academic_year, term.id).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;
        Ok(term.into_term())
    }

    pub async fn get_term_by_id_impl(&self, id: i64) -> Result<Option<AcademicTerm>> {
        let result = academic_terms::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学期失败", e))?;
        Ok(result.map(|m| m.into_term()))
    }

    /// 当前激活学期；多个学年同时激活时取开始最晚的一个
    pub async fn get_active_term_impl(&self) -> Result<Option<AcademicTerm>> {
        let result = academic_terms::Entity::find()
            .filter(academic_terms::Column::IsActive.eq(true))
            .order_by_desc(academic_terms::Column::StartDate)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询当前学期失败", e))?;
        Ok(result.map(|m| m.into_term()))
    }

    pub async fn list_terms_with_pagination_impl(
        &self,
        query: TermListQuery,
    ) -> Result<TermListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = academic_terms::Entity::find();

        if let Some(ref year) = query.academic_year {
            select = select.filter(academic_terms::Column::AcademicYear.eq(year.as_str()));
        }
        if let Some(is_active) = query.is_active {
            select = select.filter(academic_terms::Column::IsActive.eq(is_active));
        }

        let select = select
            .order_by_desc(academic_terms::Column::StartDate)
            .order_by_desc(academic_terms::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "学期").await?;
        Ok(TermListResponse {
            items: rows.into_iter().map(|m| m.into_term()).collect(),
            pagination,
        })
    }

    pub async fn update_term_impl(
        &self,
        id: i64,
        update: UpdateTermRequest,
    ) -> Result<Option<AcademicTerm>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let Some(existing) = academic_terms::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::from_db("查询学期失败", e))?
        else {
            return Ok(None);
        };

        // 合并后再整体校验
        let term = update.term.unwrap_or(existing.term);
        let start = update.start_date.unwrap_or(existing.start_date);
        let end = update.end_date.unwrap_or(existing.end_date);
        validate_term(term, start, end).map_err(SchoolError::validation)?;

        let mut model: academic_terms::ActiveModel = existing.clone().into();
        model.term.set_if_not_equals(term);
        model.start_date.set_if_not_equals(start);
        model.end_date.set_if_not_equals(end);
        if let Some(v) = update.academic_year {
            model.academic_year.set_if_not_equals(v);
        }
        if let Some(v) = update.is_active {
            model.is_active.set_if_not_equals(v);
        }
        if !model.is_changed() {
            return Ok(Some(existing.into_term()));
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| SchoolError::from_db("更新学期失败", e))?;

        if updated.is_active {
            deactivate_sibling_terms(&txn, &updated.academic_year, updated.id).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;
        Ok(Some(updated.into_term()))
    }

    /// 删除学期；考勤周期、出勤记录与汇总随之级联删除
    pub async fn delete_term_impl(&self, id: i64) -> Result<bool> {
        let result = academic_terms::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除学期失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 考勤周期 ----------

    pub async fn create_period_impl(&self, req: CreatePeriodRequest) -> Result<AttendancePeriod> {
        let term = self
            .get_term_by_id_impl(req.term_id)
            .await?
            .ok_or_else(|| SchoolError::validation(format!("Term {} does not exist", req.term_id)))?;
        validate_period_dates(&term, req.start_date, req.end_date)
            .map_err(SchoolError::validation)?;
        ensure_no_overlap(
            &self.db,
            term.id,
            req.period_type,
            req.start_date,
            req.end_date,
            None,
        )
        .await?;

        let model = attendance_periods::ActiveModel {
            period_type: Set(req.period_type.to_string()),
            term_id: Set(req.term_id),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            is_locked: Set(req.is_locked),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建考勤周期失败", e))?;
        Ok(result.into_period())
    }

    pub async fn get_period_by_id_impl(&self, id: i64) -> Result<Option<AttendancePeriod>> {
        let result = attendance_periods::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询考勤周期失败", e))?;
        Ok(result.map(|m| m.into_period()))
    }

    pub async fn list_periods_with_pagination_impl(
        &self,
        query: PeriodListQuery,
    ) -> Result<PeriodListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = attendance_periods::Entity::find();

        if let Some(term_id) = query.term_id {
            select = select.filter(attendance_periods::Column::TermId.eq(term_id));
        }
        if let Some(period_type) = query.period_type {
            select = select.filter(attendance_periods::Column::PeriodType.eq(period_type.as_str()));
        }

        let select = select
            .order_by_desc(attendance_periods::Column::StartDate)
            .order_by_desc(attendance_periods::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "考勤周期").await?;
        Ok(PeriodListResponse {
            items: rows.into_iter().map(|m| m.into_period()).collect(),
            pagination,
        })
    }

    pub async fn update_period_impl(
        &self,
        id: i64,
        update: UpdatePeriodRequest,
    ) -> Result<Option<AttendancePeriod>> {
        let Some(existing) = attendance_periods::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询考勤周期失败", e))?
        else {
            return Ok(None);
        };

        let period_type = update
            .period_type
            .unwrap_or_else(|| existing.clone().into_period().period_type);
        let start = update.start_date.unwrap_or(existing.start_date);
        let end = update.end_date.unwrap_or(existing.end_date);

        let dates_changed = start != existing.start_date
            || end != existing.end_date
            || period_type.as_str() != existing.period_type;
        if dates_changed {
            let term = self
                .get_term_by_id_impl(existing.term_id)
                .await?
                .ok_or_else(|| SchoolError::not_found("Term of period not found"))?;
            validate_period_dates(&term, start, end).map_err(SchoolError::validation)?;
            ensure_no_overlap(&self.db, term.id, period_type, start, end, Some(id)).await?;
        }

        let mut model: attendance_periods::ActiveModel = existing.clone().into();
        model.period_type.set_if_not_equals(period_type.to_string());
        model.start_date.set_if_not_equals(start);
        model.end_date.set_if_not_equals(end);
        if let Some(v) = update.is_locked {
            model.is_locked.set_if_not_equals(v);
        }
        if !model.is_changed() {
            return Ok(Some(existing.into_period()));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新考勤周期失败", e))?;
        Ok(Some(updated.into_period()))
    }

    pub async fn delete_period_impl(&self, id: i64) -> Result<bool> {
        let result = attendance_periods::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除考勤周期失败", e))?;
        Ok(result.rows_affected > 0)
    }

    /// 某学期的全部考勤周期，开始日期倒序；学期不存在时返回空列表
    pub async fn load_periods_impl(&self, term_id: i64) -> Result<Vec<AttendancePeriod>> {
        let rows = attendance_periods::Entity::find()
            .filter(attendance_periods::Column::TermId.eq(term_id))
            .order_by_desc(attendance_periods::Column::StartDate)
            .order_by_desc(attendance_periods::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("加载考勤周期失败", e))?;
        Ok(rows.into_iter().map(|m| m.into_period()).collect())
    }
}
