//! 路径参数提取器
//!
//! 路径中的 id 必须是正整数，否则直接返回 400，不进入业务处理。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter '{name}': {raw}"),
            ));
            Err(InternalError::from_response(
                format!("invalid path parameter {name}"),
                response,
            )
            .into())
        }
    }
}

macro_rules! safe_path_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_path_id(req, $param).map($name))
                }
            }
        )*
    };
}

safe_path_id! {
    SafeIDI64 => "id",
    SafeStudentIdI64 => "student_id",
    SafeFeeIdI64 => "fee_id",
    SafeAssignmentIdI64 => "assignment_id",
}
