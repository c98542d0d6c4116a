//! 学生与家长账号的数据可见范围

use actix_web::HttpResponse;
use std::sync::Arc;

use super::{forbidden, storage_error};
use crate::models::users::entities::{User, UserRole};
use crate::policy;
use crate::storage::Storage;

/// 当前账号可见的学生档案 id；None 表示不受限
pub async fn visible_student_ids(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<Option<Vec<i64>>, HttpResponse> {
    if !policy::is_owner_scoped(user) {
        return Ok(None);
    }
    let ids = match user.role {
        UserRole::Student => storage
            .get_student_by_user_id(user.id)
            .await
            .map(|s| s.map(|s| vec![s.id]).unwrap_or_default()),
        _ => storage.list_guarded_student_ids(user.id).await,
    };
    ids.map(Some)
        .map_err(|e| storage_error("Failed to resolve visible students", e))
}

/// 学生/家长只能访问关联学生名下的记录
pub async fn ensure_student_visible(
    storage: &Arc<dyn Storage>,
    user: &User,
    student_id: i64,
) -> Result<(), HttpResponse> {
    match visible_student_ids(storage, user).await? {
        Some(ids) if !ids.contains(&student_id) => {
            Err(forbidden("You can only access records of your own students"))
        }
        _ => Ok(()),
    }
}

/// 将列表过滤条件收窄到可见学生；请求的 student_id 不在范围内时返回空集合
pub fn narrow(requested: Option<i64>, visible: Option<Vec<i64>>) -> Option<Vec<i64>> {
    match (requested, visible) {
        (_, None) => None,
        (Some(id), Some(ids)) => Some(ids.into_iter().filter(|v| *v == id).collect()),
        (None, Some(ids)) => Some(ids),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow() {
        assert_eq!(narrow(Some(3), None), None);
        assert_eq!(narrow(None, Some(vec![1, 2])), Some(vec![1, 2]));
        assert_eq!(narrow(Some(2), Some(vec![1, 2])), Some(vec![2]));
        assert_eq!(narrow(Some(9), Some(vec![1, 2])), Some(vec![]));
    }
}
