use super::students::active_student_ids_in_level;
use super::{SeaOrmStorage, paginate};
use crate::entity::{assignments, class_assignments, grades, report_cards, student_assignments};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ClassLevel,
    assessments::{
        entities::{
            Assignment, Grade, ReportCard, ScoreParts, StudentAssignment, SubmissionStatus,
            average_score, ges_grade, letter_grade,
        },
        requests::{
            AssignmentListQuery, CreateAssignmentRequest, CreateGradeRequest,
            GenerateReportCardRequest, GradeListQuery, GradeSubmissionRequest,
            ReportCardListQuery, StudentAssignmentListQuery, UpdateAssignmentRequest,
            UpdateGradeRequest, UpdateReportCardRequest,
        },
        responses::{
            AssignmentCreatedResponse, AssignmentListResponse, GradeListResponse,
            ReportCardDetail, ReportCardListResponse, StudentAssignmentListResponse,
        },
    },
    fees::entities::normalize_money,
};
use crate::utils::escape_like_pattern;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, TransactionTrait,
};

fn validate_assignment_limits(max_score: i32, weight: i32) -> Result<()> {
    if max_score < 0 {
        return Err(SchoolError::validation("Max score cannot be negative"));
    }
    if !(1..=100).contains(&weight) {
        return Err(SchoolError::validation("Weight must be between 1 and 100"));
    }
    Ok(())
}

impl SeaOrmStorage {
    // ---------- 作业 ----------

    /// 创建作业，并为授课年级的在读学生生成 PENDING 记录
    pub async fn create_assignment_impl(
        &self,
        req: CreateAssignmentRequest,
    ) -> Result<AssignmentCreatedResponse> {
        validate_assignment_limits(req.max_score, req.weight)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let class_assignment = class_assignments::Entity::find_by_id(req.class_assignment_id)
            .one(&txn)
            .await
            .map_err(|e| SchoolError::from_db("查询授课安排失败", e))?
            .ok_or_else(|| {
                SchoolError::validation(format!(
                    "Class assignment {} does not exist",
                    req.class_assignment_id
                ))
            })?;

        let now = chrono::Utc::now().timestamp();
        let assignment = assignments::ActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            assignment_type: Set(req.assignment_type.to_string()),
            subject_id: Set(class_assignment.subject_id),
            class_assignment_id: Set(class_assignment.id),
            due_date: Set(req.due_date),
            max_score: Set(req.max_score),
            weight: Set(req.weight),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SchoolError::from_db("创建作业失败", e))?;

        let level = class_assignment
            .class_level
            .parse::<ClassLevel>()
            .map_err(SchoolError::validation)?;
        let student_ids = active_student_ids_in_level(&txn, level).await?;
        let created = student_ids.len() as u64;

        if !student_ids.is_empty() {
            let rows = student_ids
                .into_iter()
                .map(|student_id| student_assignments::ActiveModel {
                    student_id: Set(student_id),
                    assignment_id: Set(assignment.id),
                    status: Set(SubmissionStatus::Pending.to_string()),
                    submitted_at: Set(None),
                    score: Set(None),
                    feedback: Set(None),
                    graded_at: Set(None),
                    updated_at: Set(now),
                    ..Default::default()
                });
            student_assignments::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::from_db("生成学生作业失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;

        Ok(AssignmentCreatedResponse {
            assignment: assignment.into_assignment(),
            student_assignments_created: created,
        })
    }

    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业失败", e))?;
        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = assignments::Entity::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(assignments::Column::SubjectId.eq(subject_id));
        }
        if let Some(class_assignment_id) = query.class_assignment_id {
            select = select.filter(assignments::Column::ClassAssignmentId.eq(class_assignment_id));
        }
        if let Some(kind) = query.assignment_type {
            select = select.filter(assignments::Column::AssignmentType.eq(kind.as_str()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(assignments::Column::Title.contains(&escaped))
                    .add(assignments::Column::Description.contains(&escaped)),
            );
        }

        let select = select
            .order_by_desc(assignments::Column::DueDate)
            .order_by_desc(assignments::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "作业").await?;
        Ok(AssignmentListResponse {
            items: rows.into_iter().map(|m| m.into_assignment()).collect(),
            pagination,
        })
    }

    pub async fn update_assignment_impl(
        &self,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let Some(existing) = assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业失败", e))?
        else {
            return Ok(None);
        };

        let max_score = update.max_score.unwrap_or(existing.max_score);
        let weight = update.weight.unwrap_or(existing.weight);
        validate_assignment_limits(max_score, weight)?;

        let mut model: assignments::ActiveModel = existing.clone().into();
        if let Some(v) = update.title {
            model.title.set_if_not_equals(v);
        }
        if let Some(v) = update.description {
            model.description.set_if_not_equals(v);
        }
        if let Some(v) = update.assignment_type {
            model.assignment_type.set_if_not_equals(v.to_string());
        }
        if let Some(v) = update.due_date {
            model.due_date.set_if_not_equals(v);
        }
        model.max_score.set_if_not_equals(max_score);
        model.weight.set_if_not_equals(weight);

        if !model.is_changed() {
            return Ok(Some(existing.into_assignment()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新作业失败", e))?;
        Ok(Some(updated.into_assignment()))
    }

    /// 删除作业，学生作业记录级联删除
    pub async fn delete_assignment_impl(&self, id: i64) -> Result<bool> {
        let result = assignments::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除作业失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 学生作业 ----------

    pub async fn list_student_assignments_with_pagination_impl(
        &self,
        query: StudentAssignmentListQuery,
    ) -> Result<StudentAssignmentListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = student_assignments::Entity::find();

        if let Some(ids) = query.student_ids {
            select = select.filter(student_assignments::Column::StudentId.is_in(ids));
        }
        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(student_assignments::Column::AssignmentId.eq(assignment_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(student_assignments::Column::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(student_assignments::Column::Status.eq(status.as_str()));
        }

        let select = select
            .order_by_asc(student_assignments::Column::AssignmentId)
            .order_by_asc(student_assignments::Column::StudentId);
        let (rows, pagination) = paginate(&self.db, select, page, size, "学生作业").await?;
        Ok(StudentAssignmentListResponse {
            items: rows
                .into_iter()
                .map(|m| m.into_student_assignment())
                .collect(),
            pagination,
        })
    }

    pub async fn get_student_assignment_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<StudentAssignment>> {
        let result = student_assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生作业失败", e))?;
        Ok(result.map(|m| m.into_student_assignment()))
    }

    /// 提交作业；按截止日期判定 SUBMITTED 或 LATE，已评分的不可再提交
    pub async fn submit_student_assignment_impl(
        &self,
        id: i64,
        submitted_on: NaiveDate,
    ) -> Result<Option<StudentAssignment>> {
        let Some(existing) = student_assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生作业失败", e))?
        else {
            return Ok(None);
        };
        if existing.status == SubmissionStatus::Graded.as_str() {
            return Err(SchoolError::validation(
                "A graded assignment cannot be resubmitted",
            ));
        }

        let assignment = assignments::Entity::find_by_id(existing.assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业失败", e))?
            .ok_or_else(|| SchoolError::not_found("Assignment not found"))?;

        let status = SubmissionStatus::on_submit(submitted_on, assignment.due_date);
        let now = chrono::Utc::now().timestamp();

        let mut model: student_assignments::ActiveModel = existing.into();
        model.status = Set(status.to_string());
        model.submitted_at = Set(Some(now));
        model.updated_at = Set(now);

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("提交作业失败", e))?;
        Ok(Some(updated.into_student_assignment()))
    }

    /// 评分；分数须在 0 与作业满分之间
    pub async fn grade_student_assignment_impl(
        &self,
        id: i64,
        req: GradeSubmissionRequest,
    ) -> Result<Option<StudentAssignment>> {
        let Some(existing) = student_assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生作业失败", e))?
        else {
            return Ok(None);
        };

        let assignment = assignments::Entity::find_by_id(existing.assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询作业失败", e))?
            .ok_or_else(|| SchoolError::not_found("Assignment not found"))?;

        let score = normalize_money(req.score);
        if score < Decimal::ZERO || score > Decimal::from(assignment.max_score) {
            return Err(SchoolError::validation(format!(
                "Score must be between 0 and {}",
                assignment.max_score
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let mut model: student_assignments::ActiveModel = existing.into();
        model.status = Set(SubmissionStatus::Graded.to_string());
        model.score = Set(Some(score));
        model.feedback = Set(req.feedback);
        model.graded_at = Set(Some(now));
        model.updated_at = Set(now);

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("评分失败", e))?;
        Ok(Some(updated.into_student_assignment()))
    }

    // ---------- 成绩 ----------

    pub async fn create_grade_impl(&self, req: CreateGradeRequest) -> Result<Grade> {
        let parts = ScoreParts {
            classwork: normalize_money(req.classwork_score),
            homework: normalize_money(req.homework_score),
            test: normalize_money(req.test_score),
            exam: normalize_money(req.exam_score),
        };
        parts.validate().map_err(SchoolError::validation)?;
        let total = parts.total();

        let now = chrono::Utc::now().timestamp();
        let model = grades::ActiveModel {
            student_id: Set(req.student_id),
            subject_id: Set(req.subject_id),
            class_assignment_id: Set(req.class_assignment_id),
            academic_year: Set(req.academic_year),
            term: Set(req.term),
            classwork_score: Set(parts.classwork),
            homework_score: Set(parts.homework),
            test_score: Set(parts.test),
            exam_score: Set(parts.exam),
            total_score: Set(total),
            ges_grade: Set(ges_grade(total).to_string()),
            remarks: Set(req.remarks),
            recorded_by: Set(req.recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("录入成绩失败", e))?;
        Ok(result.into_grade())
    }

    pub async fn get_grade_by_id_impl(&self, id: i64) -> Result<Option<Grade>> {
        let result = grades::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询成绩失败", e))?;
        Ok(result.map(|m| m.into_grade()))
    }

    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = grades::Entity::find();

        if let Some(ids) = query.student_ids {
            select = select.filter(grades::Column::StudentId.is_in(ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(grades::Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(grades::Column::SubjectId.eq(subject_id));
        }
        if let Some(ref year) = query.academic_year {
            select = select.filter(grades::Column::AcademicYear.eq(year.as_str()));
        }
        if let Some(term) = query.term {
            select = select.filter(grades::Column::Term.eq(term));
        }

        let select = select
            .order_by_desc(grades::Column::AcademicYear)
            .order_by_desc(grades::Column::Term)
            .order_by_asc(grades::Column::StudentId)
            .order_by_asc(grades::Column::SubjectId);
        let (rows, pagination) = paginate(&self.db, select, page, size, "成绩").await?;
        Ok(GradeListResponse {
            items: rows.into_iter().map(|m| m.into_grade()).collect(),
            pagination,
        })
    }

    /// 修改分项后重新计算总分与等级
    pub async fn update_grade_impl(
        &self,
        id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        let Some(existing) = grades::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询成绩失败", e))?
        else {
            return Ok(None);
        };

        let parts = ScoreParts {
            classwork: normalize_money(update.classwork_score.unwrap_or(existing.classwork_score)),
            homework: normalize_money(update.homework_score.unwrap_or(existing.homework_score)),
            test: normalize_money(update.test_score.unwrap_or(existing.test_score)),
            exam: normalize_money(update.exam_score.unwrap_or(existing.exam_score)),
        };
        parts.validate().map_err(SchoolError::validation)?;
        let total = parts.total();

        let mut model: grades::ActiveModel = existing.clone().into();
        model.classwork_score.set_if_not_equals(parts.classwork);
        model.homework_score.set_if_not_equals(parts.homework);
        model.test_score.set_if_not_equals(parts.test);
        model.exam_score.set_if_not_equals(parts.exam);
        model.total_score.set_if_not_equals(total);
        model.ges_grade.set_if_not_equals(ges_grade(total).to_string());
        if let Some(v) = update.remarks {
            model.remarks.set_if_not_equals(Some(v));
        }
        if !model.is_changed() {
            return Ok(Some(existing.into_grade()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新成绩失败", e))?;
        Ok(Some(updated.into_grade()))
    }

    pub async fn delete_grade_impl(&self, id: i64) -> Result<bool> {
        let result = grades::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除成绩失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 成绩单 ----------

    async fn term_grades(
        &self,
        student_id: i64,
        academic_year: &str,
        term: i16,
    ) -> Result<Vec<grades::Model>> {
        grades::Entity::find()
            .filter(grades::Column::StudentId.eq(student_id))
            .filter(grades::Column::AcademicYear.eq(academic_year))
            .filter(grades::Column::Term.eq(term))
            .order_by_asc(grades::Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学期成绩失败", e))
    }

    /// 按该学期全部成绩的总分均值生成成绩单；已存在时重新计算
    pub async fn generate_report_card_impl(
        &self,
        req: GenerateReportCardRequest,
    ) -> Result<ReportCard> {
        let totals: Vec<Decimal> = grades::Entity::find()
            .select_only()
            .column(grades::Column::TotalScore)
            .filter(grades::Column::StudentId.eq(req.student_id))
            .filter(grades::Column::AcademicYear.eq(req.academic_year.as_str()))
            .filter(grades::Column::Term.eq(req.term))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学期成绩失败", e))?;

        let average = average_score(&totals);
        let overall = letter_grade(average).to_string();
        let now = chrono::Utc::now().timestamp();

        let existing = report_cards::Entity::find()
            .filter(report_cards::Column::StudentId.eq(req.student_id))
            .filter(report_cards::Column::AcademicYear.eq(req.academic_year.as_str()))
            .filter(report_cards::Column::Term.eq(req.term))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询成绩单失败", e))?;

        let saved = match existing {
            Some(card) => {
                let mut model: report_cards::ActiveModel = card.into();
                model.average_score = Set(average);
                model.overall_grade = Set(overall);
                if let Some(v) = req.teacher_remarks {
                    model.teacher_remarks = Set(Some(v));
                }
                if let Some(v) = req.principal_remarks {
                    model.principal_remarks = Set(Some(v));
                }
                model.updated_at = Set(now);
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| SchoolError::from_db("更新成绩单失败", e))?
            }
            None => report_cards::ActiveModel {
                student_id: Set(req.student_id),
                academic_year: Set(req.academic_year),
                term: Set(req.term),
                average_score: Set(average),
                overall_grade: Set(overall),
                is_published: Set(false),
                teacher_remarks: Set(req.teacher_remarks),
                principal_remarks: Set(req.principal_remarks),
                created_by: Set(req.created_by),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("生成成绩单失败", e))?,
        };
        Ok(saved.into_report_card())
    }

    pub async fn get_report_card_detail_impl(&self, id: i64) -> Result<Option<ReportCardDetail>> {
        let Some(card) = report_cards::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询成绩单失败", e))?
        else {
            return Ok(None);
        };

        let grades = self
            .term_grades(card.student_id, &card.academic_year, card.term)
            .await?;
        Ok(Some(ReportCardDetail {
            report_card: card.into_report_card(),
            grades: grades.into_iter().map(|m| m.into_grade()).collect(),
        }))
    }

    pub async fn list_report_cards_with_pagination_impl(
        &self,
        query: ReportCardListQuery,
    ) -> Result<ReportCardListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = report_cards::Entity::find();

        if let Some(ids) = query.student_ids {
            select = select.filter(report_cards::Column::StudentId.is_in(ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(report_cards::Column::StudentId.eq(student_id));
        }
        if let Some(ref year) = query.academic_year {
            select = select.filter(report_cards::Column::AcademicYear.eq(year.as_str()));
        }
        if let Some(term) = query.term {
            select = select.filter(report_cards::Column::Term.eq(term));
        }
        if let Some(is_published) = query.is_published {
            select = select.filter(report_cards::Column::IsPublished.eq(is_published));
        }

        let select = select
            .order_by_desc(report_cards::Column::AcademicYear)
            .order_by_desc(report_cards::Column::Term)
            .order_by_asc(report_cards::Column::StudentId);
        let (rows, pagination) = paginate(&self.db, select, page, size, "成绩单").await?;
        Ok(ReportCardListResponse {
            items: rows.into_iter().map(|m| m.into_report_card()).collect(),
            pagination,
        })
    }

    pub async fn update_report_card_impl(
        &self,
        id: i64,
        update: UpdateReportCardRequest,
    ) -> Result<Option<ReportCard>> {
        let Some(existing) = report_cards::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询成绩单失败", e))?
        else {
            return Ok(None);
        };

        let mut model: report_cards::ActiveModel = existing.clone().into();
        if let Some(v) = update.teacher_remarks {
            model.teacher_remarks.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.principal_remarks {
            model.principal_remarks.set_if_not_equals(Some(v));
        }
        if !model.is_changed() {
            return Ok(Some(existing.into_report_card()));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新成绩单失败", e))?;
        Ok(Some(updated.into_report_card()))
    }

    pub async fn set_report_card_published_impl(
        &self,
        id: i64,
        is_published: bool,
    ) -> Result<Option<ReportCard>> {
        let Some(existing) = report_cards::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询成绩单失败", e))?
        else {
            return Ok(None);
        };
        if existing.is_published == is_published {
            return Ok(Some(existing.into_report_card()));
        }

        let mut model: report_cards::ActiveModel = existing.into();
        model.is_published = Set(is_published);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("发布成绩单失败", e))?;
        Ok(Some(updated.into_report_card()))
    }

    pub async fn delete_report_card_impl(&self, id: i64) -> Result<bool> {
        let result = report_cards::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除成绩单失败", e))?;
        Ok(result.rows_affected > 0)
    }
}
