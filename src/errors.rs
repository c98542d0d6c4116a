//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 数据库错误会被归类为唯一约束、外键约束、检查约束三类完整性错误，
//! 其余归入通用数据库操作错误。

use std::fmt;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_school_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SchoolError {
            $($variant(String),)*
        }

        impl SchoolError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_school_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    DateParse("E009", "Date Parse Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    UniqueViolation("E012", "Unique Constraint Violation"),
    ForeignKeyViolation("E013", "Foreign Key Constraint Violation"),
    CheckViolation("E014", "Check Constraint Violation"),
}

impl SchoolError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于数据完整性错误（约束冲突）
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            SchoolError::UniqueViolation(_)
                | SchoolError::ForeignKeyViolation(_)
                | SchoolError::CheckViolation(_)
        )
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            SchoolError::Validation(_) | SchoolError::CheckViolation(_) => StatusCode::BAD_REQUEST,
            SchoolError::DateParse(_) | SchoolError::Serialization(_) => StatusCode::BAD_REQUEST,
            SchoolError::Authentication(_) => StatusCode::UNAUTHORIZED,
            SchoolError::Authorization(_) => StatusCode::FORBIDDEN,
            SchoolError::NotFound(_) => StatusCode::NOT_FOUND,
            SchoolError::UniqueViolation(_) | SchoolError::ForeignKeyViolation(_) => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 对应的 API 业务错误码
    pub fn error_code(&self) -> ErrorCode {
        match self {
            SchoolError::Validation(_) | SchoolError::DateParse(_) => ErrorCode::ValidationFailed,
            SchoolError::Serialization(_) => ErrorCode::BadRequest,
            SchoolError::CheckViolation(_) => ErrorCode::ConstraintViolation,
            SchoolError::Authentication(_) => ErrorCode::Unauthorized,
            SchoolError::Authorization(_) => ErrorCode::PermissionDenied,
            SchoolError::NotFound(_) => ErrorCode::NotFound,
            SchoolError::UniqueViolation(_) => ErrorCode::Conflict,
            SchoolError::ForeignKeyViolation(_) => ErrorCode::ReferenceViolation,
            _ => ErrorCode::InternalServerError,
        }
    }

    /// 转换为统一格式的 HTTP 错误响应
    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ApiResponse::error_empty(self.error_code(), self.message()))
    }

    /// 带上下文前缀的数据库错误归类
    ///
    /// 完整性错误保留其类别，仅改写消息。
    pub fn from_db(context: &str, err: sea_orm::DbErr) -> Self {
        match SchoolError::from(err) {
            SchoolError::UniqueViolation(msg) => {
                SchoolError::UniqueViolation(format!("{context}: {msg}"))
            }
            SchoolError::ForeignKeyViolation(msg) => {
                SchoolError::ForeignKeyViolation(format!("{context}: {msg}"))
            }
            SchoolError::CheckViolation(msg) => {
                SchoolError::CheckViolation(format!("{context}: {msg}"))
            }
            other => SchoolError::DatabaseOperation(format!("{context}: {}", other.message())),
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolError {}

/// 通过驱动返回的消息识别检查约束冲突
///
/// SQLite: `CHECK constraint failed`，PostgreSQL: `violates check constraint`，
/// MySQL: `Check constraint ... is violated`。
fn is_check_violation(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("check constraint failed")
        || lower.contains("violates check constraint")
        || (lower.contains("check constraint") && lower.contains("is violated"))
}

/// 通过驱动返回的消息识别外键约束冲突
///
/// SQLite 的 ON DELETE RESTRICT 以扩展码 1811 报告，`sql_err()` 无法识别，需按消息匹配。
fn is_foreign_key_violation(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("foreign key constraint failed")
        || lower.contains("violates foreign key constraint")
        || lower.contains("a foreign key constraint fails")
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SchoolError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                SchoolError::UniqueViolation(msg)
            }
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => {
                SchoolError::ForeignKeyViolation(msg)
            }
            _ => {
                let msg = err.to_string();
                if is_foreign_key_violation(&msg) {
                    SchoolError::ForeignKeyViolation(msg)
                } else if is_check_violation(&msg) {
                    SchoolError::CheckViolation(msg)
                } else {
                    SchoolError::DatabaseOperation(msg)
                }
            }
        }
    }
}

impl From<serde_json::Error> for SchoolError {
    fn from(err: serde_json::Error) -> Self {
        SchoolError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolError::cache_connection("test").code(), "E001");
        assert_eq!(SchoolError::database_config("test").code(), "E003");
        assert_eq!(SchoolError::validation("test").code(), "E006");
        assert_eq!(SchoolError::unique_violation("test").code(), "E012");
        assert_eq!(SchoolError::check_violation("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolError::foreign_key_violation("test").error_type(),
            "Foreign Key Constraint Violation"
        );
        assert_eq!(
            SchoolError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SchoolError::unique_violation("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SchoolError::foreign_key_violation("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SchoolError::check_violation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SchoolError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SchoolError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_check_violation_detection() {
        assert!(is_check_violation(
            "Execution Error: CHECK constraint failed: term >= 0"
        ));
        assert!(is_check_violation(
            "new row for relation \"fees\" violates check constraint \"fees_term_check\""
        ));
        assert!(is_check_violation(
            "Check constraint 'fees_chk_1' is violated."
        ));
        assert!(!is_check_violation("UNIQUE constraint failed: users.username"));
    }

    #[test]
    fn test_foreign_key_violation_detection() {
        assert!(is_foreign_key_violation(
            "Execution Error: error returned from database: (code: 1811) FOREIGN KEY constraint failed"
        ));
        assert!(is_foreign_key_violation(
            "update or delete on table \"users\" violates foreign key constraint \"fk_students_user\" on table \"students\""
        ));
        assert!(is_foreign_key_violation(
            "Cannot delete or update a parent row: a foreign key constraint fails"
        ));
        assert!(!is_foreign_key_violation("CHECK constraint failed: term >= 0"));

        let err = SchoolError::from_db(
            "删除账号失败",
            sea_orm::DbErr::Custom("(code: 1811) FOREIGN KEY constraint failed".into()),
        );
        assert!(matches!(err, SchoolError::ForeignKeyViolation(_)));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_from_db_keeps_category() {
        let err = SchoolError::from_db(
            "创建费用失败",
            sea_orm::DbErr::Custom("CHECK constraint failed: term >= 0".into()),
        );
        assert!(matches!(err, SchoolError::CheckViolation(_)));
        assert!(err.message().starts_with("创建费用失败"));

        let err = SchoolError::from_db("查询失败", sea_orm::DbErr::Custom("boom".into()));
        assert!(matches!(err, SchoolError::DatabaseOperation(_)));
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolError::validation("Invalid term");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid term"));
    }
}
