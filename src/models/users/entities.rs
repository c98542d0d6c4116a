use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::string_enum;

string_enum! {
    /// 账号角色
    #[ts(export, export_to = "user.ts")]
    pub enum UserRole("用户角色") {
        Admin => "admin",
        Teacher => "teacher",
        Student => "student",
        Parent => "parent",
    }
}

// 账号实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: UserRole,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 是否拥有管理员权限（超级用户、职员或 admin 角色）
    pub fn is_admin(&self) -> bool {
        self.is_superuser || self.is_staff || self.role == UserRole::Admin
    }

    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.role.as_str(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
pub(crate) fn sample_user(role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: 1,
        username: "sample.user".to_string(),
        email: String::new(),
        password_hash: String::new(),
        first_name: "Ama".to_string(),
        last_name: "Mensah".to_string(),
        phone_number: None,
        address: None,
        date_of_birth: None,
        role,
        is_staff: false,
        is_superuser: false,
        is_active: true,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_authority() {
        assert!(sample_user(UserRole::Admin).is_admin());
        assert!(!sample_user(UserRole::Teacher).is_admin());

        let mut staff = sample_user(UserRole::Teacher);
        staff.is_staff = true;
        assert!(staff.is_admin());
    }

    #[test]
    fn test_full_name_falls_back_to_username() {
        let mut user = sample_user(UserRole::Parent);
        assert_eq!(user.full_name(), "Ama Mensah");
        user.first_name.clear();
        user.last_name.clear();
        assert_eq!(user.full_name(), "sample.user");
    }
}
