//! 数据模型定义
//!
//! 每个业务域分为 `entities`（领域对象）、`requests`（请求体与查询参数）、
//! `responses`（响应体）三部分，并通过 ts-rs 导出 TypeScript 声明。

pub mod common;

pub mod users {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod auth {
    pub mod requests;
    pub mod responses;
}

pub mod groups {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod students {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod teachers {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod academics {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod attendance {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod fees {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod assessments {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod notifications {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod audit {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod system {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub use common::{
    ApiResponse, ClassLevel, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery,
    TargetKind, TargetRef,
};

/// 进程启动时间
#[derive(Debug, Clone, Copy)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
