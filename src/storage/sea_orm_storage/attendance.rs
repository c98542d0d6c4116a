use std::collections::{BTreeMap, BTreeSet};

use super::students::active_student_ids_in_level;
use super::{SeaOrmStorage, paginate};
use crate::entity::{
    academic_terms, attendance_periods, attendance_summaries, student_attendances, students,
};
use crate::errors::{Result, SchoolError};
use crate::models::attendance::{
    entities::{AttendanceCounts, AttendanceStatus, AttendanceSummary, StudentAttendance},
    requests::{
        AttendanceListQuery, RecomputeSummaryRequest, RecordAttendanceRequest, SummaryListQuery,
        UpdateAttendanceRequest,
    },
    responses::{AttendanceListResponse, RecordAttendanceResponse, SummaryListResponse},
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

async fn load_term<C: ConnectionTrait>(db: &C, term_id: i64) -> Result<academic_terms::Model> {
    academic_terms::Entity::find_by_id(term_id)
        .one(db)
        .await
        .map_err(|e| SchoolError::from_db("查询学期失败", e))?
        .ok_or_else(|| SchoolError::validation(format!("Term {term_id} does not exist")))
}

/// 加载并校验考勤周期：属于该学期、包含日期、未锁定
async fn load_open_period<C: ConnectionTrait>(
    db: &C,
    period_id: i64,
    term_id: i64,
    date: NaiveDate,
) -> Result<attendance_periods::Model> {
    let period = attendance_periods::Entity::find_by_id(period_id)
        .one(db)
        .await
        .map_err(|e| SchoolError::from_db("查询考勤周期失败", e))?
        .ok_or_else(|| SchoolError::validation(format!("Period {period_id} does not exist")))?;

    if period.term_id != term_id {
        return Err(SchoolError::validation(
            "Period does not belong to the given term",
        ));
    }
    if date < period.start_date || date > period.end_date {
        return Err(SchoolError::validation(format!(
            "Date {date} is outside the period ({} - {})",
            period.start_date, period.end_date
        )));
    }
    if period.is_locked {
        return Err(SchoolError::validation("Attendance period is locked"));
    }
    Ok(period)
}

async fn ensure_period_unlocked<C: ConnectionTrait>(db: &C, period_id: Option<i64>) -> Result<()> {
    let Some(period_id) = period_id else {
        return Ok(());
    };
    let locked = attendance_periods::Entity::find_by_id(period_id)
        .one(db)
        .await
        .map_err(|e| SchoolError::from_db("查询考勤周期失败", e))?
        .is_some_and(|p| p.is_locked);
    if locked {
        return Err(SchoolError::validation("Attendance period is locked"));
    }
    Ok(())
}

fn ensure_in_term(term: &academic_terms::Model, date: NaiveDate) -> Result<()> {
    if date < term.start_date || date > term.end_date {
        return Err(SchoolError::validation(format!(
            "Date {date} is outside the term ({} - {})",
            term.start_date, term.end_date
        )));
    }
    Ok(())
}

/// 按 学生+日期+周期 查找记录（周期可为空）
async fn find_record<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    date: NaiveDate,
    period_id: Option<i64>,
) -> Result<Option<student_attendances::Model>> {
    let mut select = student_attendances::Entity::find()
        .filter(student_attendances::Column::StudentId.eq(student_id))
        .filter(student_attendances::Column::Date.eq(date));
    select = match period_id {
        Some(id) => select.filter(student_attendances::Column::PeriodId.eq(id)),
        None => select.filter(student_attendances::Column::PeriodId.is_null()),
    };
    select
        .one(db)
        .await
        .map_err(|e| SchoolError::from_db("查询出勤记录失败", e))
}

/// 由出勤记录重新计算一条汇总并写回
///
/// 只统计该学期的记录；周期汇总还要求记录归属该周期，日期限定在起止区间内。
async fn recompute_one<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    term_id: i64,
    period_id: Option<i64>,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<attendance_summaries::Model> {
    let mut records = student_attendances::Entity::find()
        .select_only()
        .column(student_attendances::Column::Status)
        .filter(student_attendances::Column::StudentId.eq(student_id))
        .filter(student_attendances::Column::TermId.eq(term_id))
        .filter(student_attendances::Column::Date.gte(start))
        .filter(student_attendances::Column::Date.lte(end));
    if let Some(id) = period_id {
        records = records.filter(student_attendances::Column::PeriodId.eq(id));
    }
    let statuses: Vec<String> = records
        .into_tuple()
        .all(db)
        .await
        .map_err(|e| SchoolError::from_db("统计出勤记录失败", e))?;

    let counts = AttendanceCounts::tally(
        statuses
            .iter()
            .filter_map(|s| s.parse::<AttendanceStatus>().ok()),
    );

    let mut select = attendance_summaries::Entity::find()
        .filter(attendance_summaries::Column::StudentId.eq(student_id))
        .filter(attendance_summaries::Column::TermId.eq(term_id));
    select = match period_id {
        Some(id) => select.filter(attendance_summaries::Column::PeriodId.eq(id)),
        None => select.filter(attendance_summaries::Column::PeriodId.is_null()),
    };
    let existing = select
        .one(db)
        .await
        .map_err(|e| SchoolError::from_db("查询出勤汇总失败", e))?;

    let is_new = existing.is_none();
    let mut model = match existing {
        Some(m) => m.into(),
        None => attendance_summaries::ActiveModel {
            student_id: Set(student_id),
            term_id: Set(term_id),
            period_id: Set(period_id),
            ..Default::default()
        },
    };
    model.days_present = Set(counts.present);
    model.days_absent = Set(counts.absent);
    model.days_late = Set(counts.late);
    model.days_excused = Set(counts.excused);
    model.days_sick = Set(counts.sick);
    model.days_other = Set(counts.other);
    model.total_days = Set(counts.total());
    model.attendance_rate = Set(counts.attendance_rate());
    model.updated_at = Set(chrono::Utc::now().timestamp());

    let saved = if is_new {
        model.insert(db).await
    } else {
        model.update(db).await
    };
    saved.map_err(|e| SchoolError::from_db("写入出勤汇总失败", e))
}

/// 重算学生的学期汇总，以及给定周期的周期汇总
async fn recompute_affected<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    term: &academic_terms::Model,
    period_ids: &BTreeSet<i64>,
) -> Result<usize> {
    recompute_one(db, student_id, term.id, None, term.start_date, term.end_date).await?;
    let mut updated = 1;

    for &period_id in period_ids {
        if let Some(period) = attendance_periods::Entity::find_by_id(period_id)
            .one(db)
            .await
            .map_err(|e| SchoolError::from_db("查询考勤周期失败", e))?
        {
            recompute_one(
                db,
                student_id,
                period.term_id,
                Some(period.id),
                period.start_date,
                period.end_date,
            )
            .await?;
            updated += 1;
        }
    }
    Ok(updated)
}

impl SeaOrmStorage {
    /// 按年级批量记录出勤，并在同一事务内重算受影响的汇总
    pub async fn record_attendance_impl(
        &self,
        req: RecordAttendanceRequest,
    ) -> Result<RecordAttendanceResponse> {
        if req.records.is_empty() {
            return Err(SchoolError::validation("No attendance records supplied"));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let term = load_term(&txn, req.term_id).await?;
        ensure_in_term(&term, req.date)?;
        if let Some(period_id) = req.period_id {
            load_open_period(&txn, period_id, term.id, req.date).await?;
        }

        let roster: BTreeSet<i64> = active_student_ids_in_level(&txn, req.class_level)
            .await?
            .into_iter()
            .collect();

        // 同一学生重复出现时以最后一条为准
        let mut marks = BTreeMap::new();
        for mark in req.records {
            if !roster.contains(&mark.student_id) {
                return Err(SchoolError::validation(format!(
                    "Student {} is not an active student of class {}",
                    mark.student_id, req.class_level
                )));
            }
            marks.insert(mark.student_id, mark);
        }

        let now = chrono::Utc::now().timestamp();
        let mut records = Vec::with_capacity(marks.len());
        for (student_id, mark) in marks {
            let saved = match find_record(&txn, student_id, req.date, req.period_id).await? {
                Some(existing) => {
                    let mut model: student_attendances::ActiveModel = existing.into();
                    model.status = Set(mark.status.to_string());
                    model.notes = Set(mark.notes);
                    model.term_id = Set(term.id);
                    model.recorded_by = Set(req.recorded_by);
                    model.updated_at = Set(now);
                    model
                        .update(&txn)
                        .await
                        .map_err(|e| SchoolError::from_db("更新出勤记录失败", e))?
                }
                None => student_attendances::ActiveModel {
                    student_id: Set(student_id),
                    date: Set(req.date),
                    status: Set(mark.status.to_string()),
                    period_id: Set(req.period_id),
                    term_id: Set(term.id),
                    recorded_by: Set(req.recorded_by),
                    notes: Set(mark.notes),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| SchoolError::from_db("写入出勤记录失败", e))?,
            };
            records.push(saved);
        }

        let period_ids: BTreeSet<i64> = req.period_id.into_iter().collect();
        let mut summaries_updated = 0;
        for record in &records {
            summaries_updated +=
                recompute_affected(&txn, record.student_id, &term, &period_ids).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;

        Ok(RecordAttendanceResponse {
            records: records.into_iter().map(|m| m.into_attendance()).collect(),
            summaries_updated,
        })
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<StudentAttendance>> {
        let result = student_attendances::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询出勤记录失败", e))?;
        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<AttendanceListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = student_attendances::Entity::find();

        if let Some(ids) = query.student_ids {
            select = select.filter(student_attendances::Column::StudentId.is_in(ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(student_attendances::Column::StudentId.eq(student_id));
        }
        if let Some(term_id) = query.term_id {
            select = select.filter(student_attendances::Column::TermId.eq(term_id));
        }
        if let Some(period_id) = query.period_id {
            select = select.filter(student_attendances::Column::PeriodId.eq(period_id));
        }
        if let Some(date) = query.date {
            select = select.filter(student_attendances::Column::Date.eq(date));
        }
        if let Some(status) = query.status {
            select = select.filter(student_attendances::Column::Status.eq(status.as_str()));
        }
        if let Some(level) = query.class_level {
            let ids: Vec<i64> = students::Entity::find()
                .select_only()
                .column(students::Column::Id)
                .filter(students::Column::ClassLevel.eq(level.as_str()))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| SchoolError::from_db("查询年级学生失败", e))?;
            select = select.filter(student_attendances::Column::StudentId.is_in(ids));
        }

        let select = select
            .order_by_desc(student_attendances::Column::Date)
            .order_by_asc(student_attendances::Column::StudentId)
            .order_by_desc(student_attendances::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "出勤记录").await?;
        Ok(AttendanceListResponse {
            items: rows.into_iter().map(|m| m.into_attendance()).collect(),
            pagination,
        })
    }

    /// 修改出勤记录；锁定周期内的记录不能改日期或周期
    pub async fn update_attendance_impl(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<StudentAttendance>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let Some(existing) = student_attendances::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::from_db("查询出勤记录失败", e))?
        else {
            return Ok(None);
        };

        if update.clear_period && update.period_id.is_some() {
            return Err(SchoolError::validation(
                "period_id and clear_period cannot be combined",
            ));
        }
        let date = update.date.unwrap_or(existing.date);
        let period_id = if update.clear_period {
            None
        } else {
            update.period_id.or(existing.period_id)
        };
        let moved = date != existing.date || period_id != existing.period_id;

        let term = load_term(&txn, existing.term_id).await?;
        if moved {
            ensure_period_unlocked(&txn, existing.period_id).await?;
            ensure_in_term(&term, date)?;
            if let Some(pid) = period_id {
                load_open_period(&txn, pid, term.id, date).await?;
            }
        }

        let mut model: student_attendances::ActiveModel = existing.clone().into();
        model.date.set_if_not_equals(date);
        model.period_id.set_if_not_equals(period_id);
        if let Some(status) = update.status {
            model.status.set_if_not_equals(status.to_string());
        }
        if let Some(notes) = update.notes {
            model.notes.set_if_not_equals(Some(notes));
        }
        if !model.is_changed() {
            return Ok(Some(existing.into_attendance()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| SchoolError::from_db("更新出勤记录失败", e))?;

        let period_ids: BTreeSet<i64> = existing
            .period_id
            .into_iter()
            .chain(updated.period_id)
            .collect();
        recompute_affected(&txn, updated.student_id, &term, &period_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;
        Ok(Some(updated.into_attendance()))
    }

    /// 删除出勤记录并重算汇总；锁定周期内的记录不可删除
    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let Some(existing) = student_attendances::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::from_db("查询出勤记录失败", e))?
        else {
            return Ok(false);
        };
        ensure_period_unlocked(&txn, existing.period_id).await?;

        student_attendances::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::from_db("删除出勤记录失败", e))?;

        let term = load_term(&txn, existing.term_id).await?;
        let period_ids: BTreeSet<i64> = existing.period_id.into_iter().collect();
        recompute_affected(&txn, existing.student_id, &term, &period_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;
        Ok(true)
    }

    /// 重新计算汇总：给定周期时计算周期汇总，否则计算学期汇总
    pub async fn recompute_summaries_impl(
        &self,
        req: RecomputeSummaryRequest,
    ) -> Result<Vec<AttendanceSummary>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let term = load_term(&txn, req.term_id).await?;
        let (start, end) = match req.period_id {
            Some(period_id) => {
                let period = attendance_periods::Entity::find_by_id(period_id)
                    .one(&txn)
                    .await
                    .map_err(|e| SchoolError::from_db("查询考勤周期失败", e))?
                    .filter(|p| p.term_id == term.id)
                    .ok_or_else(|| {
                        SchoolError::validation(format!(
                            "Period {period_id} does not belong to term {}",
                            term.id
                        ))
                    })?;
                (period.start_date, period.end_date)
            }
            None => (term.start_date, term.end_date),
        };

        let student_ids = match (req.student_id, req.class_level) {
            (Some(student_id), _) => vec![student_id],
            (None, Some(level)) => active_student_ids_in_level(&txn, level).await?,
            (None, None) => {
                return Err(SchoolError::validation(
                    "Either student_id or class_level is required",
                ));
            }
        };

        let mut summaries = Vec::with_capacity(student_ids.len());
        for student_id in student_ids {
            let summary =
                recompute_one(&txn, student_id, term.id, req.period_id, start, end).await?;
            summaries.push(summary.into_summary());
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;
        Ok(summaries)
    }

    pub async fn list_summaries_with_pagination_impl(
        &self,
        query: SummaryListQuery,
    ) -> Result<SummaryListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = attendance_summaries::Entity::find();

        if let Some(ids) = query.student_ids {
            select = select.filter(attendance_summaries::Column::StudentId.is_in(ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(attendance_summaries::Column::StudentId.eq(student_id));
        }
        if let Some(term_id) = query.term_id {
            select = select.filter(attendance_summaries::Column::TermId.eq(term_id));
        }
        if let Some(period_id) = query.period_id {
            select = select.filter(attendance_summaries::Column::PeriodId.eq(period_id));
        }

        let select = select
            .order_by_desc(attendance_summaries::Column::UpdatedAt)
            .order_by_desc(attendance_summaries::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "出勤汇总").await?;
        Ok(SummaryListResponse {
            items: rows.into_iter().map(|m| m.into_summary()).collect(),
            pagination,
        })
    }
}
