use std::collections::BTreeSet;

use super::{SeaOrmStorage, paginate};
use crate::entity::{group_permissions, groups, permissions, user_groups, user_permissions};
use crate::errors::{Result, SchoolError};
use crate::models::groups::{
    entities::{Group, GroupDetail, Permission},
    requests::{GroupListQuery, PermissionListQuery},
    responses::GroupListResponse,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 去重后的 id 列表，保持升序
fn dedup_ids(ids: Vec<i64>) -> Vec<i64> {
    ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

/// 确认所有权限 id 都存在
async fn ensure_permissions_exist<C: ConnectionTrait>(db: &C, ids: &[i64]) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found = permissions::Entity::find()
        .filter(permissions::Column::Id.is_in(ids.to_vec()))
        .count(db)
        .await
        .map_err(|e| SchoolError::from_db("查询权限失败", e))?;
    if found as usize != ids.len() {
        return Err(SchoolError::validation("Unknown permission id in request"));
    }
    Ok(())
}

async fn permissions_by_ids<C: ConnectionTrait>(db: &C, ids: Vec<i64>) -> Result<Vec<Permission>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = permissions::Entity::find()
        .filter(permissions::Column::Id.is_in(ids))
        .order_by_asc(permissions::Column::ContentType)
        .order_by_asc(permissions::Column::Codename)
        .all(db)
        .await
        .map_err(|e| SchoolError::from_db("查询权限失败", e))?;
    Ok(rows.into_iter().map(|m| m.into_permission()).collect())
}

impl SeaOrmStorage {
    /// 创建用户组
    pub async fn create_group_impl(&self, name: &str) -> Result<Group> {
        let model = groups::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("创建用户组失败", e))?;
        Ok(result.into_group())
    }

    /// 用户组详情：权限与成员数
    pub async fn get_group_detail_impl(&self, id: i64) -> Result<Option<GroupDetail>> {
        let Some(group) = groups::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询用户组失败", e))?
        else {
            return Ok(None);
        };

        let permission_ids: Vec<i64> = group_permissions::Entity::find()
            .select_only()
            .column(group_permissions::Column::PermissionId)
            .filter(group_permissions::Column::GroupId.eq(id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询用户组权限失败", e))?;

        let member_count = user_groups::Entity::find()
            .filter(user_groups::Column::GroupId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("统计用户组成员失败", e))?;

        Ok(Some(GroupDetail {
            group: group.into_group(),
            permissions: permissions_by_ids(&self.db, permission_ids).await?,
            member_count: member_count as i64,
        }))
    }

    /// 分页列出用户组
    pub async fn list_groups_with_pagination_impl(
        &self,
        query: GroupListQuery,
    ) -> Result<GroupListResponse> {
        let (page, size) = query.pagination.normalized();
        let mut select = groups::Entity::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(groups::Column::Name.contains(escape_like_pattern(search.trim())));
        }

        let select = select.order_by_asc(groups::Column::Name);
        let (rows, pagination) = paginate(&self.db, select, page, size, "用户组").await?;

        Ok(GroupListResponse {
            items: rows.into_iter().map(|m| m.into_group()).collect(),
            pagination,
        })
    }

    /// 重命名用户组
    pub async fn rename_group_impl(&self, id: i64, name: &str) -> Result<Option<Group>> {
        let Some(existing) = groups::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询用户组失败", e))?
        else {
            return Ok(None);
        };

        let mut model: groups::ActiveModel = existing.into();
        model.name = Set(name.to_string());
        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("更新用户组失败", e))?;
        Ok(Some(updated.into_group()))
    }

    /// 删除用户组，成员关系与组权限级联删除
    pub async fn delete_group_impl(&self, id: i64) -> Result<bool> {
        let result = groups::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("删除用户组失败", e))?;
        Ok(result.rows_affected > 0)
    }

    /// 替换用户组权限
    pub async fn set_group_permissions_impl(
        &self,
        group_id: i64,
        permission_ids: Vec<i64>,
    ) -> Result<Vec<Permission>> {
        let ids = dedup_ids(permission_ids);
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        let exists = groups::Entity::find_by_id(group_id)
            .count(&txn)
            .await
            .map_err(|e| SchoolError::from_db("查询用户组失败", e))?;
        if exists == 0 {
            return Err(SchoolError::not_found(format!("Group {group_id} not found")));
        }
        ensure_permissions_exist(&txn, &ids).await?;

        group_permissions::Entity::delete_many()
            .filter(group_permissions::Column::GroupId.eq(group_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::from_db("清除用户组权限失败", e))?;

        if !ids.is_empty() {
            let rows = ids.iter().map(|&permission_id| group_permissions::ActiveModel {
                group_id: Set(group_id),
                permission_id: Set(permission_id),
                ..Default::default()
            });
            group_permissions::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::from_db("写入用户组权限失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;

        permissions_by_ids(&self.db, ids).await
    }

    /// 列出权限，可按内容类型筛选
    pub async fn list_permissions_impl(&self, query: PermissionListQuery) -> Result<Vec<Permission>> {
        let mut select = permissions::Entity::find();
        if let Some(ref content_type) = query.content_type
            && !content_type.trim().is_empty()
        {
            select = select.filter(permissions::Column::ContentType.eq(content_type.trim()));
        }
        let rows = select
            .order_by_asc(permissions::Column::ContentType)
            .order_by_asc(permissions::Column::Codename)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询权限列表失败", e))?;
        Ok(rows.into_iter().map(|m| m.into_permission()).collect())
    }

    /// 幂等写入权限行
    pub async fn seed_permissions_impl(
        &self,
        entries: Vec<(String, String, String)>,
    ) -> Result<u64> {
        let existing: Vec<(String, String)> = permissions::Entity::find()
            .select_only()
            .column(permissions::Column::ContentType)
            .column(permissions::Column::Codename)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询权限失败", e))?;
        let existing: BTreeSet<(String, String)> = existing.into_iter().collect();

        let missing: Vec<permissions::ActiveModel> = entries
            .into_iter()
            .filter(|(ct, code, _)| !existing.contains(&(ct.clone(), code.clone())))
            .map(|(content_type, codename, name)| permissions::ActiveModel {
                name: Set(name),
                content_type: Set(content_type),
                codename: Set(codename),
                ..Default::default()
            })
            .collect();

        let inserted = missing.len() as u64;
        if inserted > 0 {
            permissions::Entity::insert_many(missing)
                .exec(&self.db)
                .await
                .map_err(|e| SchoolError::from_db("写入权限失败", e))?;
        }
        Ok(inserted)
    }

    /// 替换账号所属用户组
    pub async fn set_user_groups_impl(&self, user_id: i64, group_ids: Vec<i64>) -> Result<Vec<Group>> {
        let ids = dedup_ids(group_ids);
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::from_db("开启事务失败", e))?;

        if !ids.is_empty() {
            let found = groups::Entity::find()
                .filter(groups::Column::Id.is_in(ids.clone()))
                .count(&txn)
                .await
                .map_err(|e| SchoolError::from_db("查询用户组失败", e))?;
            if found as usize != ids.len() {
                return Err(SchoolError::validation("Unknown group id in request"));
            }
        }

        user_groups::Entity::delete_many()
            .filter(user_groups::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| SchoolError::from_db("清除账号用户组失败", e))?;

        if !ids.is_empty() {
            let rows = ids.iter().map(|&group_id| user_groups::ActiveModel {
                user_id: Set(user_id),
                group_id: Set(group_id),
                ..Default::default()
            });
            user_groups::Entity::insert_many(rows)
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::from_db("写入账号用户组失败", e))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::from_db("提交事务失败", e))?;

        self.list_user_groups_impl(user_id).await
    }

    pub async fn list_user_groups_impl(&self, user_id: i64) -> Result<Vec<Group>> {
        let group_ids: Vec<i64> = user_groups::Entity::find()
            .select_only()
            .column(user_groups::Column::GroupId)
            .filter(user_groups::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询账号用户组失败", e))?;
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = groups::Entity::find()
            .filter(groups::Column::Id.is_in(group_ids))
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询用户组失败", e))?;
        Ok(rows.into_iter().map(|m| m.into_group()).collect())
    }

    /// 直接授予权限（已存在的跳过）
    pub async fn grant_user_permissions_impl(
        &self,
        user_id: i64,
        permission_ids: Vec<i64>,
    ) -> Result<Vec<Permission>> {
        let ids = dedup_ids(permission_ids);
        ensure_permissions_exist(&self.db, &ids).await?;

        let current: BTreeSet<i64> = self.direct_permission_ids(user_id).await?.into_iter().collect();
        let rows: Vec<user_permissions::ActiveModel> = ids
            .into_iter()
            .filter(|id| !current.contains(id))
            .map(|permission_id| user_permissions::ActiveModel {
                user_id: Set(user_id),
                permission_id: Set(permission_id),
                ..Default::default()
            })
            .collect();

        if !rows.is_empty() {
            user_permissions::Entity::insert_many(rows)
                .exec(&self.db)
                .await
                .map_err(|e| SchoolError::from_db("授予权限失败", e))?;
        }
        self.list_user_direct_permissions_impl(user_id).await
    }

    /// 撤销直接授予的权限
    pub async fn revoke_user_permissions_impl(
        &self,
        user_id: i64,
        permission_ids: Vec<i64>,
    ) -> Result<Vec<Permission>> {
        let ids = dedup_ids(permission_ids);
        if !ids.is_empty() {
            user_permissions::Entity::delete_many()
                .filter(user_permissions::Column::UserId.eq(user_id))
                .filter(user_permissions::Column::PermissionId.is_in(ids))
                .exec(&self.db)
                .await
                .map_err(|e| SchoolError::from_db("撤销权限失败", e))?;
        }
        self.list_user_direct_permissions_impl(user_id).await
    }

    async fn direct_permission_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        user_permissions::Entity::find()
            .select_only()
            .column(user_permissions::Column::PermissionId)
            .filter(user_permissions::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询账号权限失败", e))
    }

    async fn group_permission_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        let group_ids: Vec<i64> = user_groups::Entity::find()
            .select_only()
            .column(user_groups::Column::GroupId)
            .filter(user_groups::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询账号用户组失败", e))?;
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        group_permissions::Entity::find()
            .select_only()
            .column(group_permissions::Column::PermissionId)
            .filter(group_permissions::Column::GroupId.is_in(group_ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询用户组权限失败", e))
    }

    pub async fn list_user_direct_permissions_impl(&self, user_id: i64) -> Result<Vec<Permission>> {
        let ids = self.direct_permission_ids(user_id).await?;
        permissions_by_ids(&self.db, ids).await
    }

    /// 有效权限代码：直接授予与用户组继承的并集
    pub async fn list_effective_codenames_impl(&self, user_id: i64) -> Result<Vec<String>> {
        let mut ids = self.direct_permission_ids(user_id).await?;
        ids.extend(self.group_permission_ids(user_id).await?);
        let codenames: BTreeSet<String> = permissions_by_ids(&self.db, dedup_ids(ids))
            .await?
            .into_iter()
            .map(|p| p.codename)
            .collect();
        Ok(codenames.into_iter().collect())
    }

    /// 账号是否持有某个权限（直接或经由用户组）
    pub async fn user_has_permission_impl(
        &self,
        user_id: i64,
        content_type: &str,
        codename: &str,
    ) -> Result<bool> {
        let Some(permission) = permissions::Entity::find()
            .filter(permissions::Column::ContentType.eq(content_type))
            .filter(permissions::Column::Codename.eq(codename))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::from_db("查询权限失败", e))?
        else {
            return Ok(false);
        };

        if self.direct_permission_ids(user_id).await?.contains(&permission.id) {
            return Ok(true);
        }
        Ok(self
            .group_permission_ids(user_id)
            .await?
            .contains(&permission.id))
    }
}
