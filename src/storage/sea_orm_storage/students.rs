use super::users::insert_user;
use super::{SeaOrmStorage, paginate};
use crate::entity::{parent_guardians, students};
use crate::errors::{Result, SchoolError};
use crate::models::{
    ClassLevel,
    students::{
        entities::{ParentGuardian, Student},
        requests::{
            CreateParentRequest, CreateStudentRequest, ParentListQuery, StudentListQuery,
            UpdateParentRequest, UpdateStudentRequest,
        },
        responses::{ParentListResponse, StudentListResponse},
    },
    users::{entities::User, requests::CreateUserRequest},
};
use crate::utils::escape_like_pattern;
use crate::utils::random_code::{format_student_id, student_id_prefix};
use chrono::Datelike;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 某年级在读学生的 ID，按 ID 升序
pub(super) async fn active_student_ids_in_level<C: ConnectionTrait>(
    db: &C,
    level: ClassLevel,
) -> Result<Vec<i64>> {
    students::Entity::find()
        .select_only()
        .column(students::Column::Id)
        .filter(students::Column::ClassLevel.eq(level.as_str()))
        .filter(students::Column::IsActive.eq(true))
        .order_by_asc(students::Column::Id)
        .into_tuple()
        .all(db)
        .await
        .map_err(|e| SchoolError::from_db("查询年级学生失败", e))
}

impl SeaOrmStorage {
    /// 下一个可用学号：同前缀已有数量 + 1，遇到占用时顺延
    async fn next_student_id(&self, prefix: &str) -> Result<String> {
        let taken = students::Entity::find()
            .filter(students::Column::StudentId.starts_with(prefix))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学号失败", e))?;

        let mut seq = taken as u32 + 1;
        loop {
            let candidate = format_student_id(prefix, seq);
            let exists = students::Entity::find()
                .filter(students::Column::StudentId.eq(candidate.as_str()))
                .count(&self.db)
                .await
                .map_err(|e| SchoolError::from_db("查询学号失败", e))?;
            if exists == 0 {
                return Ok(candidate);
            }
            seq += 1;
        }
    }

    /// 创建学生档案
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now();
        let admission_date = req.admission_date.unwrap_or_else(|| now.date_naive());

        let student_id = match req.student_id.map(|s| s.trim().to_string()) {
            Some(id) if !id.is_empty() => id,
            _ => {
                let prefix = student_id_prefix(admission_date.year(), req.class_level);
                self.next_student_id(&prefix).await?
            }
        };

        let ts = now.timestamp();
        let model = students::ActiveModel {
            student_id: Set(student_id),
            user_id: Set(req.user_id),
            first_name: Set(req.first_name),
            middle_name: Set(req.middle_name),
            last_name: Set(req.last_name),
            date_of_birth: Set(req.date_of_birth),
            gender: Set(req.gender.to_string()),
            nationality: Set(req.nationality.unwrap_or_else(|| "Ghanaian".to_string())),
            ethnicity: Set(req.ethnicity),
            religion: Set(req.religion),
            place_of_birth: Set(req.place_of_birth),
            residential_address: Set(req.residential_address),
            class_level: Set(req.class_level.to_string()),
            admission_date: Set(admission_date),
            is_active: Set(true),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建学生档案失败", e))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = students::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生档案失败", e))?;
        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = students::Entity::find()
            .filter(students::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生档案失败", e))?;
        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生；默认只列出在读学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = students::Entity::find();

        if let Some(ids) = query.ids {
            select = select.filter(students::Column::Id.is_in(ids));
        }

        if let Some(level) = query.class_level {
            select = select.filter(students::Column::ClassLevel.eq(level.as_str()));
        }

        match (query.is_active, query.include_inactive.unwrap_or(false)) {
            (Some(is_active), _) => select = select.filter(students::Column::IsActive.eq(is_active)),
            (None, false) => select = select.filter(students::Column::IsActive.eq(true)),
            (None, true) => {}
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(students::Column::StudentId.contains(&escaped))
                    .add(students::Column::FirstName.contains(&escaped))
                    .add(students::Column::MiddleName.contains(&escaped))
                    .add(students::Column::LastName.contains(&escaped)),
            );
        }

        let select = select
            .order_by_asc(students::Column::ClassLevel)
            .order_by_asc(students::Column::LastName)
            .order_by_asc(students::Column::Id);
        let (rows, pagination) = paginate(&self.db, select, page, size, "学生").await?;

        Ok(StudentListResponse {
            items: rows.into_iter().map(|m| m.into_student()).collect(),
            pagination,
        })
    }

    /// 部分更新学生档案；未变化时不改动 updated_at
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = students::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询学生档案失败", e))?
        else {
            return Ok(None);
        };

        let mut model: students::ActiveModel = existing.into();

        if let Some(v) = update.first_name {
            model.first_name.set_if_not_equals(v);
        }
        if let Some(v) = update.middle_name {
            model.middle_name.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.last_name {
            model.last_name.set_if_not_equals(v);
        }
        if let Some(v) = update.date_of_birth {
            model.date_of_birth.set_if_not_equals(v);
        }
        if let Some(v) = update.gender {
            model.gender.set_if_not_equals(v.to_string());
        }
        if let Some(v) = update.nationality {
            model.nationality.set_if_not_equals(v);
        }
        if let Some(v) = update.ethnicity {
            model.ethnicity.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.religion {
            model.religion.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.place_of_birth {
            model.place_of_birth.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.residential_address {
            model.residential_address.set_if_not_equals(v);
        }
        if let Some(v) = update.class_level {
            model.class_level.set_if_not_equals(v.to_string());
        }
        if let Some(v) = update.admission_date {
            model.admission_date.set_if_not_equals(v);
        }
        if let Some(v) = update.is_active {
            model.is_active.set_if_not_equals(v);
        }

        // 与原值相同的字段不会被标记为已修改
        if !model.is_changed() {
            return self.get_student_by_id_impl(id).await;
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新学生档案失败", e))?;
        Ok(Some(updated.into_student()))
    }

    /// 软删除学生
    pub async fn deactivate_student_impl(&self, id: i64) -> Result<bool> {
        let result = students::Entity::update_many()
            .col_expr(students::Column::IsActive, sea_orm::sea_query::Expr::value(false))
            .col_expr(
                students::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(students::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("停用学生失败", e))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_guarded_student_ids_impl(&self, parent_user_id: i64) -> Result<Vec<i64>> {
        parent_guardians::Entity::find()
            .select_only()
            .column(parent_guardians::Column::StudentId)
            .filter(parent_guardians::Column::UserId.eq(parent_user_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询监护关系失败", e))
    }

    /// 创建家长/监护人，必要时在同一事务中创建家长账号
    pub async fn create_parent_impl(
        &self,
        req: CreateParentRequest,
        account: Option<CreateUserRequest>,
    ) -> Result<(ParentGuardian, Option<User>)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let created_user = match account {
            Some(account) => Some(insert_user(&txn, account).await?),
            None => None,
        };

        let now = chrono::Utc::now().timestamp();
        let model = parent_guardians::ActiveModel {
            user_id: Set(created_user.as_ref().map(|u| u.id).or(req.user_id)),
            student_id: Set(req.student_id),
            full_name: Set(req.full_name),
            occupation: Set(req.occupation),
            relationship: Set(req.relationship.to_string()),
            phone_number: Set(req.phone_number),
            email: Set(req.email),
            address: Set(req.address),
            is_emergency_contact: Set(req.is_emergency_contact),
            emergency_contact_priority: Set(req.emergency_contact_priority),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let parent = model
            .insert(&txn)
            .await
            .map_err(|e| SchoolError::from_db("创建家长信息失败", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;

        Ok((parent.into_parent(), created_user))
    }

    pub async fn get_parent_by_id_impl(&self, id: i64) -> Result<Option<ParentGuardian>> {
        let result = parent_guardians::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询家长信息失败", e))?;
        Ok(result.map(|m| m.into_parent()))
    }

    pub async fn list_parents_with_pagination_impl(
        &self,
        query: ParentListQuery,
    ) -> Result<ParentListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = parent_guardians::Entity::find();

        if let Some(ids) = query.student_ids {
            select = select.filter(parent_guardians::Column::StudentId.is_in(ids));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(parent_guardians::Column::StudentId.eq(student_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(parent_guardians::Column::FullName.contains(&escaped))
                    .add(parent_guardians::Column::PhoneNumber.contains(&escaped))
                    .add(parent_guardians::Column::Email.contains(&escaped)),
            );
        }

        let select = select
            .order_by_asc(parent_guardians::Column::StudentId)
            .order_by_asc(parent_guardians::Column::EmergencyContactPriority);
        let (rows, pagination) = paginate(&self.db, select, page, size, "家长").await?;

        Ok(ParentListResponse {
            items: rows.into_iter().map(|m| m.into_parent()).collect(),
            pagination,
        })
    }

    pub async fn update_parent_impl(
        &self,
        id: i64,
        update: UpdateParentRequest,
    ) -> Result<Option<ParentGuardian>> {
        let Some(existing) = parent_guardians::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询家长信息失败", e))?
        else {
            return Ok(None);
        };

        let mut model: parent_guardians::ActiveModel = existing.into();
        if let Some(v) = update.full_name {
            model.full_name.set_if_not_equals(v);
        }
        if let Some(v) = update.occupation {
            model.occupation.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.relationship {
            model.relationship.set_if_not_equals(v.to_string());
        }
        if let Some(v) = update.phone_number {
            model.phone_number.set_if_not_equals(v);
        }
        if let Some(v) = update.email {
            model.email.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.address {
            model.address.set_if_not_equals(Some(v));
        }
        if let Some(v) = update.is_emergency_contact {
            model.is_emergency_contact.set_if_not_equals(v);
        }
        if let Some(v) = update.emergency_contact_priority {
            model.emergency_contact_priority.set_if_not_equals(v);
        }

        if !model.is_changed() {
            return self.get_parent_by_id_impl(id).await;
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新家长信息失败", e))?;
        Ok(Some(updated.into_parent()))
    }

    pub async fn delete_parent_impl(&self, id: i64) -> Result<bool> {
        let result = parent_guardians::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除家长信息失败", e))?;
        Ok(result.rows_affected > 0)
    }

    /// 学生的紧急联系人，按优先级排序
    pub async fn list_emergency_contacts_impl(&self, student_id: i64) -> Result<Vec<ParentGuardian>> {
        let rows = parent_guardians::Entity::find()
            .filter(parent_guardians::Column::StudentId.eq(student_id))
            .filter(parent_guardians::Column::IsEmergencyContact.eq(true))
            .order_by_asc(parent_guardians::Column::EmergencyContactPriority)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询紧急联系人失败", e))?;
        Ok(rows.into_iter().map(|m| m.into_parent()).collect())
    }
}
