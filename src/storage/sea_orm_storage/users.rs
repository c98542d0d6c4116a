use super::{SeaOrmStorage, paginate};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SchoolError};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    responses::UserListResponse,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

/// 构造账号插入模型，供事务内复用
pub(super) async fn insert_user<C: ConnectionTrait>(db: &C, req: CreateUserRequest) -> Result<User> {
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        username: Set(req.username),
        email: Set(req.email),
        password_hash: Set(req.password),
        first_name: Set(req.first_name),
        last_name: Set(req.last_name),
        phone_number: Set(req.phone_number),
        address: Set(req.address),
        date_of_birth: Set(req.date_of_birth),
        role: Set(req.role.to_string()),
        is_staff: Set(req.is_staff),
        is_superuser: Set(req.is_superuser),
        is_active: Set(true),
        last_login: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let result = model
        .insert(db)
        .await
        .map_err(|e| SchoolError::from_db("创建账号失败", e))?;

    Ok(result.into_user())
}

impl SeaOrmStorage {
    /// 创建账号
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        insert_user(&self.db, req).await
    }

    /// 通过 ID 获取账号
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询账号失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取账号
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询账号失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取账号
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let mut condition = Condition::any().add(Column::Username.eq(identifier));
        if identifier.contains('@') {
            condition = condition.add(Column::Email.eq(identifier));
        }

        let result = Users::find()
            .filter(condition)
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询账号失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出账号
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.as_str()));
        }

        // 状态筛选
        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let (users, pagination) = paginate(&self.db, select, page, size, "账号").await?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination,
        })
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新最后登录时间失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新账号（部分更新；password 已是哈希值）
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查账号是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }

        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }

        if let Some(phone_number) = update.phone_number {
            model.phone_number = Set(Some(phone_number));
        }

        if let Some(address) = update.address {
            model.address = Set(Some(address));
        }

        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(Some(date_of_birth));
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        if let Some(is_staff) = update.is_staff {
            model.is_staff = Set(is_staff);
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新账号失败", e))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除账号；被学生或教师档案引用时由外键拒绝
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除账号失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计账号数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("统计账号数量失败", e))?;

        Ok(count)
    }
}
