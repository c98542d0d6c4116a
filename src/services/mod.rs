pub mod academics;
pub mod activity;
pub mod assessments;
pub mod attendance;
pub mod audit;
pub mod auth;
pub mod fees;
pub mod groups;
pub mod notifications;
pub mod scope;
pub mod students;
pub mod system;
pub mod teachers;
pub mod users;

pub use academics::AcademicService;
pub use assessments::AssessmentService;
pub use attendance::AttendanceService;
pub use audit::AuditService;
pub use auth::AuthService;
pub use fees::FeeService;
pub use groups::GroupService;
pub use notifications::NotificationService;
pub use students::StudentService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};
use tracing::{error, info};

use crate::errors::SchoolError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};

/// 存储层错误转为统一响应；服务端错误记 error 日志，其余记 info
pub(crate) fn storage_error(context: &str, err: SchoolError) -> HttpResponse {
    if err.status_code().is_server_error() {
        error!("{}: {}", context, err);
    } else {
        info!("{}: {}", context, err);
    }
    err.to_response()
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::PermissionDenied, message))
}

/// 当前账号；路由未挂载 RequireJWT 时返回 401
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))
    })
}

/// 学年格式校验失败时的 400 响应
pub(crate) fn check_academic_year(year: &str) -> Result<(), HttpResponse> {
    crate::utils::validate::validate_academic_year(year)
        .map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))
}

pub(crate) fn check_term(term: i16) -> Result<(), HttpResponse> {
    crate::utils::validate::validate_term_number(term)
        .map_err(|msg| bad_request(ErrorCode::ValidationFailed, msg))
}

/// 为每个服务生成惰性 storage 访问
macro_rules! lazy_storage_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> std::sync::Arc<dyn $crate::storage::Storage> {
                if let Some(storage) = &self.storage {
                    storage.clone()
                } else {
                    request
                        .app_data::<actix_web::web::Data<std::sync::Arc<dyn $crate::storage::Storage>>>()
                        .expect("Storage not found in app data")
                        .get_ref()
                        .clone()
                }
            }
        }
    };
}

pub(crate) use lazy_storage_service;
