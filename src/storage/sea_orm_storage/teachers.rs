use std::collections::BTreeSet;

use super::{SeaOrmStorage, paginate};
use crate::entity::{subjects, teacher_subjects, teachers};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ClassLevel,
    academics::entities::Subject,
    teachers::{
        entities::{Teacher, TeacherDetail},
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 以新集合替换教师的任教科目
async fn replace_subjects<C: ConnectionTrait>(
    db: &C,
    teacher_id: i64,
    subject_ids: Vec<i64>,
) -> Result<()> {
    let ids: Vec<i64> = subject_ids
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if !ids.is_empty() {
        let found = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(ids.clone()))
            .count(db)
            .await
            .map_err(|e| SchoolError::from_db("查询科目失败", e))?;
        if found as usize != ids.len() {
            return Err(SchoolError::validation("Unknown subject id in request"));
        }
    }

    teacher_subjects::Entity::delete_many()
        .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
        .exec(db)
        .await
        .map_err(|e| SchoolError::from_db("清除任教科目失败", e))?;

    if !ids.is_empty() {
        let rows = ids.into_iter().map(|subject_id| teacher_subjects::ActiveModel {
            teacher_id: Set(teacher_id),
            subject_id: Set(subject_id),
            ..Default::default()
        });
        teacher_subjects::Entity::insert_many(rows)
            .exec(db)
            .await
            .map_err(|e| SchoolError::from_db("写入任教科目失败", e))?;
    }
    Ok(())
}

impl SeaOrmStorage {
    /// 创建教师档案及任教科目
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<TeacherDetail> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let now = chrono::Utc::now().timestamp();
        let model = teachers::ActiveModel {
            user_id: Set(req.user_id),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            date_of_birth: Set(req.date_of_birth),
            gender: Set(req.gender.to_string()),
            phone_number: Set(req.phone_number),
            email: Set(req.email),
            address: Set(req.address),
            class_levels: Set(ClassLevel::join_list(&req.class_levels)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let teacher = model
            .insert(&txn)
            .await
            .map_err(|e| SchoolError::from_db("创建教师档案失败", e))?;

        replace_subjects(&txn, teacher.id, req.subject_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;

        let subjects = self.list_teacher_subjects_impl(teacher.id).await?;
        Ok(TeacherDetail {
            teacher: teacher.into_teacher(),
            subjects,
        })
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<TeacherDetail>> {
        let Some(teacher) = teachers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询教师档案失败", e))?
        else {
            return Ok(None);
        };

        let subjects = self.list_teacher_subjects_impl(id).await?;
        Ok(Some(TeacherDetail {
            teacher: teacher.into_teacher(),
            subjects,
        }))
    }

    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = teachers::Entity::find()
            .filter(teachers::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询教师档案失败", e))?;
        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = teachers::Entity::find();

        if !query.include_inactive.unwrap_or(false) {
            select = select.filter(teachers::Column::IsActive.eq(true));
        }

        // 年级以逗号分隔存储，按整项匹配
        if let Some(level) = query.class_level {
            let code = level.as_str();
            select = select.filter(
                Condition::any()
                    .add(teachers::Column::ClassLevels.eq(code))
                    .add(teachers::Column::ClassLevels.starts_with(format!("{code},")))
                    .add(teachers::Column::ClassLevels.ends_with(format!(",{code}")))
                    .add(teachers::Column::ClassLevels.contains(format!(",{code},"))),
            );
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(teachers::Column::FirstName.contains(&escaped))
                    .add(teachers::Column::LastName.contains(&escaped))
                    .add(teachers::Column::Email.contains(&escaped)),
            );
        }

        let select = select
            .order_by_asc(teachers::Column::LastName)
            .order_by_asc(teachers::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "教师").await?;

        Ok(TeacherListResponse {
            items: rows.into_iter().map(|m| m.into_teacher()).collect(),
            pagination,
        })
    }

    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let Some(existing) = teachers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询教师档案失败", e))?
        else {
            return Ok(None);
        };

        let mut model: teachers::ActiveModel = existing.into();
        if let Some(v) = update.first_name {
            model.first_name.set_if_not_equals(v);
        }
        if let Some(v) = update.last_name {
            model.last_name.set_if_not_equals(v);
        }
        if let Some(v) = update.date_of_birth {
            model.date_of_birth.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.gender {
            model.gender.set_if_not_equals(v.to_string());
        }
        if let Some(v) = update.phone_number {
            model.phone_number.set_if_not_equals(v);
        }
        if let Some(v) = update.email {
            model.email.set_if_not_equals(v);
        }
        if let Some(v) = update.address {
            model.address.set_if_not_equals(v);
        }
        if let Some(levels) = update.class_levels {
            model.class_levels.set_if_not_equals(ClassLevel::join_list(&levels));
        }
        if let Some(v) = update.is_active {
            model.is_active.set_if_not_equals(v);
        }

        if !model.is_changed() {
            return Ok(self.get_teacher_by_id_impl(id).await?.map(|d| d.teacher));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新教师档案失败", e))?;
        Ok(Some(updated.into_teacher()))
    }

    pub async fn deactivate_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = teachers::Entity::update_many()
            .col_expr(teachers::Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(
                teachers::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(teachers::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("停用教师失败", e))?;
        Ok(result.rows_affected > 0)
    }

    /// 替换教师任教科目
    pub async fn set_teacher_subjects_impl(
        &self,
        teacher_id: i64,
        subject_ids: Vec<i64>,
    ) -> Result<Vec<Subject>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let exists = teachers::Entity::find_by_id(teacher_id)
            .count(&txn)
            .await
            .map_err(|e| SchoolError::from_db("查询教师档案失败", e))?;
        if exists == 0 {
            return Err(SchoolError::not_found(format!("Teacher {teacher_id} not found")));
        }

        replace_subjects(&txn, teacher_id, subject_ids).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;

        self.list_teacher_subjects_impl(teacher_id).await
    }

    pub async fn list_teacher_subjects_impl(&self, teacher_id: i64) -> Result<Vec<Subject>> {
        let subject_ids: Vec<i64> = teacher_subjects::Entity::find()
            .select_only()
            .column(teacher_subjects::Column::SubjectId)
            .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询任教科目失败", e))?;
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询科目失败", e))?;
        Ok(rows.into_iter().map(|m| m.into_subject()).collect())
    }
}
