pub mod class_level;
pub mod error_code;
pub mod pagination;
pub mod response;
pub mod string_enum;
pub mod target;

pub use class_level::ClassLevel;
pub use error_code::ErrorCode;
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
pub use target::{TargetKind, TargetRef};
